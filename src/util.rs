use chrono::NaiveDate;
use chrono_tz::Asia::Taipei;

use crate::errors::{MarketMapError, Result};

// 日期转换工具
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(MarketMapError::DateError)
}

/// 每日快照的资源键，月日补零：2024-1-5 -> "2024-01-05.json"
pub fn snapshot_key(date: &NaiveDate) -> String {
    format!("{}.json", date.format("%Y-%m-%d"))
}

/// 台北时区的今天。行情档按交易日命名，主机的UTC日期在收盘后可能还是前一天
pub fn today_taipei() -> NaiveDate {
    chrono::Utc::now().with_timezone(&Taipei).date_naive()
}

// 数值宽松解析工具
//
// 上游快照的数值字段常以字符串形式出现，偶尔还有"-"或空串这类占位符。
// 解析失败一律回退为0，之后的流水线不再做任何校验。
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// 大数缩写，用于inspect输出：1234567 -> "1.23M"
pub fn abbr_number(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1e12 {
        format!("{}{:.2}T", sign, abs / 1e12)
    } else if abs >= 1e9 {
        format!("{}{:.2}B", sign, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}{:.2}M", sign, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}{:.2}K", sign, abs / 1e3)
    } else {
        format!("{}{:.0}", sign, abs)
    }
}
