use std::cmp::Ordering;

use log::debug;

use crate::models::market::{MarketNode, TradeRecord};

/// 面积权重：成交量整数部分的十进制位数
///
/// 权重取位数而不是成交量本身，量级差上亿倍的个股才能同图可读。
/// 负数与无效值先归零，"0"也算一位，零成交的个股保持可见。
pub fn volume_weight(volume: f64) -> u32 {
    let truncated = volume.max(0.0).trunc() as u64;
    truncated.to_string().len() as u32
}

/// 带权重标注的层级节点
///
/// 由MarketNode一次性转换而来，转换后不再携带可变状态：
/// 分组权重为子树叶子权重之和，个股权重见volume_weight。
#[derive(Debug, Clone)]
pub struct WeightedNode {
    pub name: String,
    pub record: Option<TradeRecord>,
    pub weight: f64,
    pub children: Vec<WeightedNode>,
}

impl WeightedNode {
    /// 消费快照树，产出带权重、同层已排序的标注树
    pub fn from_market(node: MarketNode) -> WeightedNode {
        let mut annotated = annotate(node);
        sort_siblings(&mut annotated);
        annotated
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// 先序收集全部带纪录的叶子
    pub fn leaf_records(&self) -> Vec<&TradeRecord> {
        let mut records = Vec::new();
        collect_records(self, &mut records);
        records
    }

    pub fn count_leaves(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(WeightedNode::count_leaves).sum()
        }
    }

    pub fn count_groups(&self) -> usize {
        if self.is_leaf() {
            0
        } else {
            1 + self.children.iter().map(WeightedNode::count_groups).sum::<usize>()
        }
    }

    /// debug模式用：每个分组只留前limit个子节点
    pub fn truncate_groups(&mut self, limit: usize) {
        if self.children.len() > limit {
            self.children.truncate(limit);
        }
        for child in &mut self.children {
            child.truncate_groups(limit);
        }
        self.weight = if self.is_leaf() {
            self.weight
        } else {
            self.children.iter().map(|c| c.weight).sum()
        };
    }
}

fn annotate(node: MarketNode) -> WeightedNode {
    let MarketNode { name, data, children } = node;
    match children {
        Some(children) if !children.is_empty() => {
            if data.is_some() {
                debug!("Dropping payload on group node: {}", name);
            }
            let children: Vec<WeightedNode> = children.into_iter().map(annotate).collect();
            let weight = children.iter().map(|c| c.weight).sum();
            WeightedNode { name, record: None, weight, children }
        }
        _ => {
            let weight = data
                .as_ref()
                .map_or(0.0, |r| f64::from(volume_weight(r.trade_volume)));
            WeightedNode { name, record: data, weight, children: Vec::new() }
        }
    }
}

// 同层排序：双方都带成交纪录时按成交金额降序，任何一方是分组
// 或无纪录叶子则视为相等。sort_by是稳定排序，原顺序因此保留。
fn sort_siblings(node: &mut WeightedNode) {
    node.children.sort_by(|a, b| match (&a.record, &b.record) {
        (Some(ra), Some(rb)) => rb
            .trade_value
            .partial_cmp(&ra.trade_value)
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    });
    for child in &mut node.children {
        sort_siblings(child);
    }
}

fn collect_records<'a>(node: &'a WeightedNode, out: &mut Vec<&'a TradeRecord>) {
    if let Some(record) = &node.record {
        out.push(record);
    }
    for child in &node.children {
        collect_records(child, out);
    }
}
