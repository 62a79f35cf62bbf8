// src/parser/http.rs
// =============================================================================
// The bundled PageParser: fetches pages over HTTP(S) or from local files.
//
// - http/https: one GET through a shared reqwest client. Non-2xx responses
//   are errors. No retries; that decision belongs to whoever wraps us.
// - file: read straight from disk (handy for offline crawls and tests)
//
// The body is handed to html::parse_page once the I/O is finished, so the
// (non-Send) scraper document never lives across an await point.
// =============================================================================

use crate::config::Pattern;
use crate::parser::{html, PageParser, ParsedPage};
use anyhow::{anyhow, bail, Context, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpPageParser {
    client: Client,
    ignored_words: Vec<Pattern>,
}

impl HttpPageParser {
    /// Builds the parser with one reusable HTTP client (connection pooling).
    pub fn new(ignored_words: Vec<Pattern>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            ignored_words,
        })
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        let body = match url.scheme() {
            "http" | "https" => fetch_http(&self.client, url).await?,
            "file" => read_file(url).await?,
            other => bail!("unsupported URL scheme '{}'", other),
        };
        Ok(body)
    }
}

impl PageParser for HttpPageParser {
    fn parse<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ParsedPage>> {
        Box::pin(async move {
            let parsed = Url::parse(url).with_context(|| format!("invalid URL '{}'", url))?;
            let body = self
                .fetch(&parsed)
                .await
                .with_context(|| format!("failed to fetch {}", url))?;

            Ok(html::parse_page(&body, &parsed, &self.ignored_words))
        })
    }
}

async fn fetch_http(client: &Client, url: &Url) -> Result<String> {
    let response = client.get(url.as_str()).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    Ok(response.text().await?)
}

async fn read_file(url: &Url) -> Result<String> {
    let path = url
        .to_file_path()
        .map_err(|_| anyhow!("not a local file path: {}", url))?;

    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("could not read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_parses_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("index.html");
        fs::write(
            &page,
            r#"<body><p>hello hello world</p><a href="next.html">next</a></body>"#,
        )
        .unwrap();

        let url = Url::from_file_path(&page).unwrap();
        let parser = HttpPageParser::new(Vec::new()).unwrap();
        let parsed = parser.parse(url.as_str()).await.unwrap();

        assert_eq!(parsed.word_counts["hello"], 2);
        assert_eq!(parsed.word_counts["world"], 1);
        let expected = Url::from_file_path(dir.path().join("next.html")).unwrap();
        assert_eq!(parsed.links, vec![expected.to_string()]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.html")).unwrap();

        let parser = HttpPageParser::new(Vec::new()).unwrap();
        assert!(parser.parse(url.as_str()).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_unsupported_scheme() {
        let parser = HttpPageParser::new(Vec::new()).unwrap();
        let err = parser.parse("ftp://example.com/file").await.unwrap_err();
        assert!(format!("{:#}", err).contains("unsupported URL scheme"));
    }

    #[tokio::test]
    async fn test_rejects_garbage_url() {
        let parser = HttpPageParser::new(Vec::new()).unwrap();
        assert!(parser.parse("not a url").await.is_err());
    }
}
