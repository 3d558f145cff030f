use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{DataError, DataResult, NewsItem};

pub const NEWS_URL: &str = "https://newsapi.org/v2";

/// Categories served by the top-headlines endpoint; anything else is a query search
pub const HEADLINE_CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    #[serde(default)]
    source: NewsApiSource,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

/// NewsAPI client for industry/category headlines
pub struct NewsApiClient {
    api_key: String,
    http_client: reqwest::Client,
}

impl NewsApiClient {
    pub fn new(api_key: String, timeout: std::time::Duration) -> DataResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stockreport/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_key,
            http_client,
        })
    }

    /// Top US headlines for a category, or for a free-text topic when the
    /// category is not one of [`HEADLINE_CATEGORIES`]
    pub async fn top_headlines(&self, category: &str) -> DataResult<Vec<NewsItem>> {
        let category = category.trim().to_lowercase();
        if HEADLINE_CATEGORIES.contains(&category.as_str()) {
            tracing::debug!(%category, "Getting top headlines for category");
            self.fetch(&[("country", "us"), ("category", category.as_str())])
                .await
        } else {
            tracing::debug!(%category, "Category not found, defaulting to query search");
            self.top_headlines_by_query(&category).await
        }
    }

    pub async fn top_headlines_by_query(&self, query: &str) -> DataResult<Vec<NewsItem>> {
        tracing::debug!(query, "Getting top headlines for query");
        self.fetch(&[("country", "us"), ("q", query)]).await
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> DataResult<Vec<NewsItem>> {
        let url = format!("{}/top-headlines", NEWS_URL);
        let response = self
            .http_client
            .get(&url)
            .query(params)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(status = status.as_u16(), "NewsAPI request failed: {}", error_text);
            return Err(DataError::Api {
                status_code: status.as_u16(),
                message: format!("NewsAPI error: {}", error_text),
            });
        }

        let body: NewsApiResponse = response.json().await?;
        let articles = headlines_from_newsapi(body);
        tracing::info!("Fetched {} headlines from NewsAPI", articles.len());
        Ok(articles)
    }
}

fn headlines_from_newsapi(body: NewsApiResponse) -> Vec<NewsItem> {
    body.articles
        .into_iter()
        .map(|article| {
            let published_at = article
                .published_at
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.with_timezone(&Utc))
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

            NewsItem {
                headline: article.title.unwrap_or_else(|| "No title".to_string()),
                source: article.source.name.unwrap_or_else(|| "Unknown".to_string()),
                url: article.url.unwrap_or_default(),
                image: article.url_to_image.unwrap_or_default(),
                summary: article.description.unwrap_or_default(),
                published_at,
                symbol: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines_parse() {
        let body: NewsApiResponse = serde_json::from_str(
            r#"{
                "status": "ok",
                "totalResults": 2,
                "articles": [
                    {"source": {"id": null, "name": "Reuters"}, "title": "Chips rally",
                     "description": "Semis up", "url": "https://r.example/1",
                     "urlToImage": "https://r.example/1.png", "publishedAt": "2024-03-01T12:00:00Z"},
                    {"source": {}, "title": null, "publishedAt": "garbage"}
                ]
            }"#,
        )
        .unwrap();

        let items = headlines_from_newsapi(body);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].headline, "Chips rally");
        assert_eq!(items[0].source, "Reuters");
        assert_eq!(items[0].summary, "Semis up");
        assert_eq!(items[0].published_at.timestamp(), 1_709_294_400);
        assert_eq!(items[1].headline, "No title");
        assert_eq!(items[1].source, "Unknown");
        assert_eq!(items[1].published_at, DateTime::<Utc>::UNIX_EPOCH);
        assert!(items.iter().all(|i| i.symbol.is_none()));
    }
}
