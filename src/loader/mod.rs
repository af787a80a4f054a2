//! 每日快照加载
//!
//! 两种来源(本地目录、HTTP静态站)走同一个异步接口。渲染端只消费
//! load_daily：任何加载失败都降级为"当日无资料"，错误记日志后吞掉，
//! 不会让一次坏请求把渲染整个打断。

pub mod file;
pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{error, info};

use crate::errors::Result;
use crate::models::market::MarketNode;

pub use file::FileSource;
pub use http::HttpSource;

/// 快照来源的统一接口
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// 来源标识，日志用
    fn source_kind(&self) -> &'static str;

    /// 取指定交易日的完整快照树
    async fn fetch_snapshot(&self, date: &NaiveDate) -> Result<MarketNode>;
}

/// 渲染端的加载边界：成功给树，失败给None
pub async fn load_daily(source: &dyn SnapshotSource, date: &NaiveDate) -> Option<MarketNode> {
    match source.fetch_snapshot(date).await {
        Ok(tree) => {
            info!("Loaded snapshot for {} from {} source", date, source.source_kind());
            Some(tree)
        }
        Err(e) => {
            error!("Failed to load snapshot for {}: {}", date, e);
            None
        }
    }
}
