use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::catalog::{CatalogItem, Shop};

/// Read-only client for the remote food catalog and shop list.
///
/// There is no retry and no cache: a failed fetch is logged and shows up as
/// an empty list.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch_items(&self) -> Vec<CatalogItem> {
        self.fetch_list("foods").await
    }

    pub async fn fetch_shops(&self) -> Vec<Shop> {
        self.fetch_list("shops").await
    }

    async fn fetch_list<T: DeserializeOwned>(&self, resource: &str) -> Vec<T> {
        match self.try_fetch(resource).await {
            Ok(list) => list,
            Err(e) => {
                log::error!("Error fetching {}: {}", resource, e);
                Vec::new()
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, reqwest::Error> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), resource);
        self.http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
