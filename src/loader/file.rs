use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use crate::errors::{MarketMapError, Result};
use crate::loader::SnapshotSource;
use crate::models::market::MarketNode;
use crate::util::snapshot_key;

/// 本地快照目录来源
///
/// 目录里按交易日存放{YYYY-MM-DD}.json，与静态站的目录结构一致，
/// 同一份资料两种来源都能读。
pub struct FileSource {
    data_dir: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        FileSource { data_dir: data_dir.into() }
    }

    pub fn snapshot_path(&self, date: &NaiveDate) -> PathBuf {
        self.data_dir.join(snapshot_key(date))
    }

    /// 扫描快照目录，找最近的交易日。目录里没有快照时给None
    pub async fn latest_date(&self) -> Result<Option<NaiveDate>> {
        let mut entries = tokio::fs::read_dir(&self.data_dir).await?;
        let mut latest: Option<NaiveDate> = None;
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            if let Some(name) = file_name.to_str() {
                if let Some(stem) = name.strip_suffix(".json") {
                    if let Ok(date) = crate::util::parse_date(stem) {
                        latest = Some(latest.map_or(date, |d| d.max(date)));
                    }
                }
            }
        }
        Ok(latest)
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    fn source_kind(&self) -> &'static str {
        "file"
    }

    async fn fetch_snapshot(&self, date: &NaiveDate) -> Result<MarketNode> {
        let path = self.snapshot_path(date);
        debug!("读取快照文件 {}", path.display());
        if !path.exists() {
            return Err(MarketMapError::SnapshotError(format!(
                "no snapshot at {}",
                path.display()
            )));
        }
        let bytes = tokio::fs::read(&path).await?;
        let tree: MarketNode = serde_json::from_slice(&bytes)?;
        Ok(tree)
    }
}
