use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use log::{info, warn};

use crate::config::Config;
use crate::errors::Result;
use crate::loader::{load_daily, SnapshotSource};
use crate::render::{render_empty, render_page, render_svg};
use crate::treemap::layout::{layout, LayoutConfig};
use crate::treemap::weight::WeightedNode;

/// 当次渲染用到的快照状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStatus {
    Loaded { leaves: usize, groups: usize },
    Missing,
}

/// 单次渲染的产出
#[derive(Debug)]
pub struct RenderOutput {
    pub date: NaiveDate,
    /// 单调递增的渲染代号。并发发起多次渲染时调用方只认最大代号，
    /// 迟到的旧结果按代号丢弃，不会盖掉新结果。
    pub generation: u64,
    pub status: SnapshotStatus,
    pub document: String,
}

/// 快照摘要，inspect子命令用
#[derive(Debug)]
pub struct SnapshotSummary {
    pub date: NaiveDate,
    pub groups: usize,
    pub leaves: usize,
    pub total_trade_value: f64,
    pub top_by_value: Vec<TopEntry>,
}

#[derive(Debug)]
pub struct TopEntry {
    pub code: String,
    pub name: String,
    pub closing_price: f64,
    pub change: String,
    pub trade_value: f64,
}

/// 渲染服务：加载快照、建树、布局、输出文档
pub struct RenderService {
    config: Config,
    source: Arc<dyn SnapshotSource>,
    generation: AtomicU64,
}

impl RenderService {
    /// 创建新的渲染服务实例
    pub fn new(config: Config, source: Arc<dyn SnapshotSource>) -> Self {
        Self { config, source, generation: AtomicU64::new(0) }
    }

    /// 渲染指定交易日的行情树状图
    ///
    /// 快照缺失不算错误：照样产出带整页提示的空文档，状态标Missing。
    pub async fn render_daily(&self, date: &NaiveDate) -> Result<RenderOutput> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Rendering market map for {} (generation {})", date, generation);

        let (status, svg) = match load_daily(self.source.as_ref(), date).await {
            Some(market) => {
                let mut weighted = WeightedNode::from_market(market);
                if self.config.debug_mode {
                    weighted.truncate_groups(self.config.debug_group_limit);
                    info!(
                        "DEBUG MODE: groups truncated to {} children each",
                        self.config.debug_group_limit
                    );
                }
                let placed = layout(&weighted, self.config.viewport, &LayoutConfig::default());
                info!("Laid out {} nodes for {}", placed.nodes.len(), date);
                let status = SnapshotStatus::Loaded {
                    leaves: weighted.count_leaves(),
                    groups: weighted.count_groups(),
                };
                (status, render_svg(&placed, self.config.viewport))
            }
            None => {
                warn!("No snapshot for {}, rendering empty notice", date);
                (SnapshotStatus::Missing, render_empty(self.config.viewport))
            }
        };

        let document = if self.config.emit_page {
            render_page(&svg, &format!("台股每日行情 {}", date))
        } else {
            svg
        };

        Ok(RenderOutput { date: *date, generation, status, document })
    }

    /// 渲染并写盘，返回输出文件路径
    pub async fn render_to_file(&self, date: &NaiveDate) -> Result<PathBuf> {
        let output = self.render_daily(date).await?;
        let ext = if self.config.emit_page { "html" } else { "svg" };
        let path =
            PathBuf::from(&self.config.output_dir).join(format!("marketmap-{}.{}", date, ext));
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        tokio::fs::write(&path, output.document.as_bytes()).await?;
        info!("Wrote {} ({} bytes)", path.display(), output.document.len());
        Ok(path)
    }

    /// 统计指定交易日的快照概况
    ///
    /// 与渲染不同，这里快照缺失直接报错：用户点名要看资料，没有就说没有。
    pub async fn inspect(&self, date: &NaiveDate, limit: usize) -> Result<SnapshotSummary> {
        let market = self.source.fetch_snapshot(date).await?;
        let weighted = WeightedNode::from_market(market);

        let mut records = weighted.leaf_records();
        records.sort_by(|a, b| {
            b.trade_value.partial_cmp(&a.trade_value).unwrap_or(std::cmp::Ordering::Equal)
        });
        let total_trade_value: f64 = records.iter().map(|r| r.trade_value).sum();
        let top_by_value = records
            .iter()
            .take(limit)
            .map(|r| TopEntry {
                code: r.code.clone(),
                name: r.name.clone(),
                closing_price: r.closing_price,
                change: r.change.clone(),
                trade_value: r.trade_value,
            })
            .collect();

        Ok(SnapshotSummary {
            date: *date,
            groups: weighted.count_groups(),
            leaves: weighted.count_leaves(),
            total_trade_value,
            top_by_value,
        })
    }
}
