//! Wikipedia REST summary client

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{first_sentences, KnowledgeSource, LookupOutcome};

/// Candidate titles offered for an ambiguous topic
const MAX_OPTIONS: &str = "10";

#[derive(Clone)]
pub struct WikipediaClient {
    client: Client,
    base_url: String,
    sentences: usize,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    extract: String,
}

/// `[query, titles, descriptions, urls]`
#[derive(Debug, Deserialize)]
struct OpenSearch(IgnoredAny, Vec<String>, IgnoredAny, IgnoredAny);

impl WikipediaClient {
    pub fn new(base_url: &str, timeout: Duration, sentences: usize) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jarvis-daemon/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url, sentences))
    }

    pub fn with_client(client: Client, base_url: &str, sentences: usize) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            sentences: sentences.max(1),
        }
    }

    fn summary_url(&self, topic: &str) -> Option<Url> {
        let title = topic.replace(' ', "_");
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["api", "rest_v1", "page", "summary", title.as_str()]);
        Some(url)
    }

    async fn fetch(&self, topic: &str) -> Result<LookupOutcome, reqwest::Error> {
        let Some(url) = self.summary_url(topic) else {
            return Ok(LookupOutcome::Failed(format!("invalid base url {}", self.base_url)));
        };

        debug!(%url, "fetching page summary");
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(LookupOutcome::NotFound);
        }
        let summary: PageSummary = response.error_for_status()?.json().await?;

        Ok(match summary.kind.as_str() {
            "disambiguation" => LookupOutcome::Ambiguous(self.options(topic).await?),
            _ if summary.extract.trim().is_empty() => LookupOutcome::NotFound,
            _ => LookupOutcome::Summary(first_sentences(&summary.extract, self.sentences)),
        })
    }

    /// Titles of pages a disambiguation could mean
    async fn options(&self, topic: &str) -> Result<Vec<String>, reqwest::Error> {
        let OpenSearch(_, titles, _, _) = self
            .client
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "opensearch"),
                ("search", topic),
                ("limit", MAX_OPTIONS),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(titles
            .into_iter()
            .filter(|title| !title.eq_ignore_ascii_case(topic))
            .collect())
    }
}

impl KnowledgeSource for WikipediaClient {
    async fn lookup(&self, topic: &str) -> LookupOutcome {
        if topic.trim().is_empty() {
            return LookupOutcome::NotFound;
        }

        match self.fetch(topic).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(?e, %topic, "wikipedia lookup failed");
                LookupOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{local_http_client, serve_http};

    fn client(base_url: &str) -> WikipediaClient {
        WikipediaClient::with_client(local_http_client(), base_url, 2)
    }

    #[test]
    fn test_summary_url() {
        let url = client("https://en.wikipedia.org/")
            .summary_url("alan turing")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/alan_turing"
        );
    }

    #[tokio::test]
    async fn test_empty_topic_is_not_found() {
        assert_eq!(client("http://127.0.0.1:9").lookup("  ").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_summary_is_trimmed_to_sentences() {
        let base = serve_http(vec![(
            200,
            r#"{"type":"standard","extract":"One. Two. Three."}"#,
        )])
        .await;
        assert_eq!(
            client(&base).lookup("numbers").await,
            LookupOutcome::Summary("One. Two.".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_page() {
        let base = serve_http(vec![(404, r#"{"type":"not_found"}"#)]).await;
        assert_eq!(client(&base).lookup("qwertyuiop").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_disambiguation_lists_options() {
        let base = serve_http(vec![
            (200, r#"{"type":"disambiguation","extract":"Mercury may refer to:"}"#),
            (
                200,
                r#"["mercury",["Mercury","Mercury (planet)","Mercury (element)"],[],[]]"#,
            ),
        ])
        .await;
        assert_eq!(
            client(&base).lookup("mercury").await,
            LookupOutcome::Ambiguous(vec![
                "Mercury (planet)".to_string(),
                "Mercury (element)".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn test_server_error_is_failure() {
        let base = serve_http(vec![(500, "{}")]).await;
        assert!(matches!(
            client(&base).lookup("anything").await,
            LookupOutcome::Failed(_)
        ));
    }
}
