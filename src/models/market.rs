use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::util::coerce_number;

/// 个股单日成交纪录
///
/// 上游快照的数值字段多为字符串，偶有占位符("-"、空串)，
/// 反序列化时统一宽松转换为f64，失败回退为0，后续流程不再校验。
/// Change保留原文，提示卡原样显示；配色用的数值形式见change_value()。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TradeRecord {
    pub code: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub trade_volume: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub transaction: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub trade_value: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub opening_price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub highest_price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lowest_price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub closing_price: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub change: String,
    pub time: String,
}

impl TradeRecord {
    /// 涨跌额的数值形式，解析失败视为0
    pub fn change_value(&self) -> f64 {
        coerce_number(&self.change)
    }
}

/// 市场层级节点：大盘 -> 产业分类 -> 个股
///
/// 带非空children的节点是分组；个股叶子带data；两者皆无的节点
/// 保留为零权重叶子。分组上多余的data在建树时丢弃。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarketNode {
    pub name: String,
    pub data: Option<TradeRecord>,
    pub children: Option<Vec<MarketNode>>,
}

impl MarketNode {
    /// 非空children才算分组，children为空数组的节点按叶子处理
    pub fn is_group(&self) -> bool {
        self.children.as_ref().map_or(false, |c| !c.is_empty())
    }
}

// 数值或字符串一律转f64，其他类型归0
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_value(&value))
}

fn lenient_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => {
            let v = n.as_f64().unwrap_or_default();
            if v.is_finite() {
                v
            } else {
                0.0
            }
        }
        Value::String(s) => coerce_number(s),
        _ => 0.0,
    }
}

// 数值字段偶尔以JSON数字出现，显示用字段统一转为字符串
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        _ => String::new(),
    })
}
