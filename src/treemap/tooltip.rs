//! 悬停提示卡：内容表格与行为参数
//!
//! 这里只产出纯数据(HTML片段与常量)，真正的DOM操作在页面脚本里，
//! 脚本由render::page从同一组常量生成，两边不会漂移。

use crate::models::market::TradeRecord;
use crate::treemap::color::change_color;

/// 提示卡行为参数
#[derive(Debug, Clone, Copy)]
pub struct TooltipSpec {
    /// 相对光标的偏移，像素
    pub offset_x: u32,
    pub offset_y: u32,
    /// 渐入时长，毫秒
    pub fade_in_ms: u32,
    /// 渐入后的不透明度
    pub opacity: f64,
}

pub const TOOLTIP: TooltipSpec =
    TooltipSpec { offset_x: 4, offset_y: 4, fade_in_ms: 200, opacity: 0.9 };

/// 单档个股的提示卡内容：代号、收盘价、涨跌徽章(底色即矩形配色)、名称
pub fn tooltip_html(record: &TradeRecord) -> String {
    let badge = change_color(record.change_value(), record.opening_price);
    format!(
        concat!(
            r#"<table width="100%" style="color:black;">"#,
            "<tr>",
            "<th>{code}</th>",
            r#"<td rowspan="2">{close}</td>"#,
            r#"<td rowspan="2" style="border-width:1px;border-radius:5px;color:white;background-color:{badge}">{change}</td>"#,
            "</tr>",
            "<tr>",
            r#"<th style="font-size:12px">{name}</th>"#,
            "</tr>",
            "</table>"
        ),
        code = escape_html(&record.code),
        close = record.closing_price,
        badge = badge.hex(),
        change = escape_html(&record.change),
        name = escape_html(&record.name),
    )
}

/// HTML转义，内容与属性两用
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
