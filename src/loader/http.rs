use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use reqwest::Client;

use crate::errors::{MarketMapError, Result};
use crate::loader::SnapshotSource;
use crate::models::market::MarketNode;
use crate::util::snapshot_key;

/// HTTP静态站来源
///
/// 快照以静态文件形式挂在{base_url}/{YYYY-MM-DD}.json，
/// 没有查询接口，404就是当日无资料。
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MarketMapError::RequestError(e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn snapshot_url(&self, date: &NaiveDate) -> String {
        format!("{}/{}", self.base_url, snapshot_key(date))
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    fn source_kind(&self) -> &'static str {
        "http"
    }

    async fn fetch_snapshot(&self, date: &NaiveDate) -> Result<MarketNode> {
        let url = self.snapshot_url(date);
        info!("获取快照 {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketMapError::RequestError(e))?;

        if !response.status().is_success() {
            return Err(MarketMapError::SnapshotError(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        let tree = response.json::<MarketNode>().await?;
        Ok(tree)
    }
}
