//! SVG文档输出
//!
//! 叶子画矩形加尺寸门槛标签，深度小于3的节点画标题带文字。
//! 带纪录的元素附data-tip属性，页面脚本用它驱动提示卡；裸SVG
//! 里该属性只是惰性数据，不影响显示。

use std::fmt::Write as _;

use crate::treemap::color::{change_color, NEUTRAL};
use crate::treemap::label;
use crate::treemap::layout::{TreemapLayout, Viewport};
use crate::treemap::tooltip::{escape_html, tooltip_html};

/// 当日快照缺失时的整页提示
pub const NO_DATA_NOTICE: &str = "本日無資料, 請按左上角按鈕選取時間";

/// 把布局结果画成完整SVG文档
pub fn render_svg(layout: &TreemapLayout<'_>, viewport: Viewport) -> String {
    let mut svg = String::new();
    open_svg(&mut svg, viewport);

    for node in layout.leaves() {
        let fill = node
            .record
            .map_or(NEUTRAL, |r| change_color(r.change_value(), r.opening_price));
        let tip = node.record.map(|r| escape_html(&tooltip_html(r)));
        let tip_attr = tip.as_ref().map_or(String::new(), |t| format!(" data-tip='{}'", t));

        let _ = writeln!(
            svg,
            "  <rect x='{}' y='{}' width='{}' height='{}' fill='{}' stroke='black'{}/>",
            node.rect.x0,
            node.rect.y0,
            node.rect.width(),
            node.rect.height(),
            fill.hex(),
            tip_attr,
        );

        // 矩形太小标签留空，文本节点照样输出
        let text = label::leaf_label(node.name, node.rect.width(), node.rect.height());
        let _ = writeln!(
            svg,
            "  <text x='{}' y='{}' font-size='{}px' fill='white'{}>{}</text>",
            node.rect.x0 + label::LEAF_LABEL_DX,
            node.rect.y0 + label::LEAF_LABEL_DY,
            label::LEAF_LABEL_FONT_PX,
            tip_attr,
            escape_html(text),
        );
    }

    // 标题带：深度0/1/2的全部节点，不做尺寸门槛
    for node in layout.titled() {
        let _ = writeln!(
            svg,
            "  <text x='{}' y='{}' font-size='{}px' fill='white'>{}</text>",
            node.rect.x0 + label::TITLE_DX,
            node.rect.y0 + label::TITLE_DY,
            label::TITLE_FONT_PX,
            escape_html(node.name),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// 快照缺失时的空文档：只有整页提示，没有任何矩形
pub fn render_empty(viewport: Viewport) -> String {
    let mut svg = String::new();
    open_svg(&mut svg, viewport);
    let _ = writeln!(svg, "  <text x='6' y='22' stroke='white'>{}</text>", NO_DATA_NOTICE);
    svg.push_str("</svg>\n");
    svg
}

fn open_svg(svg: &mut String, viewport: Viewport) {
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}' style='font: 10px sans-serif'>",
        w = viewport.width,
        h = viewport.height,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::market::{MarketNode, TradeRecord};
    use crate::treemap::layout::{layout, LayoutConfig};
    use crate::treemap::weight::WeightedNode;

    fn two_leaf_market() -> MarketNode {
        // 200x200视口下的双叶子样例：A权重4红系，B权重2绿系
        let a = TradeRecord {
            code: "1101".to_string(),
            name: "甲股".to_string(),
            trade_volume: 1000.0,
            trade_value: 500.0,
            opening_price: 100.0,
            closing_price: 105.0,
            change: "5".to_string(),
            ..TradeRecord::default()
        };
        let b = TradeRecord {
            code: "2202".to_string(),
            name: "乙股".to_string(),
            trade_volume: 10.0,
            trade_value: 10.0,
            opening_price: 50.0,
            closing_price: 48.0,
            change: "-2".to_string(),
            ..TradeRecord::default()
        };
        MarketNode {
            name: "台股".to_string(),
            data: None,
            children: Some(vec![
                MarketNode { name: "甲股".to_string(), data: Some(a), children: None },
                MarketNode { name: "乙股".to_string(), data: Some(b), children: None },
            ]),
        }
    }

    #[test]
    fn end_to_end_two_leaf_document() {
        let tree = WeightedNode::from_market(two_leaf_market());
        let result = layout(&tree, Viewport::new(200.0, 200.0), &LayoutConfig::default());
        let svg = render_svg(&result, Viewport::new(200.0, 200.0));

        assert!(svg.contains("width='200' height='200'"));
        // 高成交金额的甲股排前、面积更大、红系中段
        assert!(svg.contains("<rect x='3' y='19' width='129' height='178' fill='#ac1e10'"));
        // 乙股绿系中段，与甲股之间1px缝隙
        assert!(svg.contains("<rect x='133' y='19' width='64' height='178' fill='#10a422'"));
        // 两个叶子都够大，标签显示名称
        assert!(svg.contains("<text x='4' y='26' font-size='8px' fill='white'"));
        assert!(svg.contains(">甲股</text>"));
        assert!(svg.contains(">乙股</text>"));
        // 根节点标题
        assert!(svg.contains("<text x='2' y='16' font-size='10px' fill='white'>台股</text>"));
        assert_eq!(svg.matches("<rect").count(), 2);
    }

    #[test]
    fn leaves_carry_tooltip_data() {
        let tree = WeightedNode::from_market(two_leaf_market());
        let result = layout(&tree, Viewport::new(200.0, 200.0), &LayoutConfig::default());
        let svg = render_svg(&result, Viewport::new(200.0, 200.0));
        // 矩形与标签文本都带data-tip，悬停目标一致
        assert_eq!(svg.matches("data-tip='").count(), 4);
        assert!(svg.contains("1101"));
        assert!(svg.contains("-2"));
    }

    #[test]
    fn titles_cover_first_three_depths_only() {
        let leaf = |name: &str| MarketNode {
            name: name.to_string(),
            data: Some(TradeRecord {
                name: name.to_string(),
                trade_volume: 100000.0,
                ..TradeRecord::default()
            }),
            children: None,
        };
        let tree = MarketNode {
            name: "市場".to_string(),
            data: None,
            children: Some(vec![MarketNode {
                name: "一類".to_string(),
                data: None,
                children: Some(vec![MarketNode {
                    name: "二類".to_string(),
                    data: None,
                    children: Some(vec![leaf("深葉")]),
                }]),
            }]),
        };
        let weighted = WeightedNode::from_market(tree);
        let result = layout(&weighted, Viewport::new(400.0, 400.0), &LayoutConfig::default());
        let svg = render_svg(&result, Viewport::new(400.0, 400.0));

        assert!(svg.contains(">市場</text>"));
        assert!(svg.contains(">一類</text>"));
        assert!(svg.contains(">二類</text>"));
        // 深度3的叶子只有门槛标签，没有标题带文字
        assert_eq!(svg.matches(">深葉</text>").count(), 1);
        assert_eq!(svg.matches("font-size='10px'").count(), 3);
    }

    #[test]
    fn cramped_leaf_gets_empty_label() {
        let tree = WeightedNode::from_market(two_leaf_market());
        let result = layout(&tree, Viewport::new(60.0, 30.0), &LayoutConfig::default());
        let svg = render_svg(&result, Viewport::new(60.0, 30.0));
        // 文本节点存在但内容为空
        assert!(svg.contains("></text>"));
        assert_eq!(svg.matches("<rect").count(), 2);
    }

    #[test]
    fn missing_snapshot_document() {
        let svg = render_empty(Viewport::new(800.0, 1920.0));
        assert!(svg.contains(NO_DATA_NOTICE));
        assert!(svg.contains("<text x='6' y='22' stroke='white'>"));
        assert!(!svg.contains("<rect"));
        assert!(svg.contains("width='800' height='1920'"));
    }

    #[test]
    fn svg_text_is_escaped() {
        let record = TradeRecord {
            code: "9988".to_string(),
            name: "A&B<正>".to_string(),
            trade_volume: 100000.0,
            opening_price: 10.0,
            change: "1".to_string(),
            ..TradeRecord::default()
        };
        let tree = WeightedNode::from_market(MarketNode {
            name: "台股".to_string(),
            data: None,
            children: Some(vec![MarketNode {
                name: "A&B<正>".to_string(),
                data: Some(record),
                children: None,
            }]),
        });
        let result = layout(&tree, Viewport::new(300.0, 300.0), &LayoutConfig::default());
        let svg = render_svg(&result, Viewport::new(300.0, 300.0));
        assert!(svg.contains("A&amp;B&lt;正&gt;"));
        assert!(!svg.contains("<正>"));
    }
}
