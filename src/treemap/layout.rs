//! 方形化铺砖布局
//!
//! 行累积算法：只要最坏长宽比不变差就向当前行追加子节点，行满后沿
//! 剩余区域的短边铺出整行。面积与权重成正比，同层顺序由排序阶段给
//! 定，这里原样使用。
//!
//! 间距语义：每个非根节点相对父层分到的槽位再向内收缩半个内边距，
//! 父节点给子节点铺砖的区域按"外边距减半内边距"收缩(顶部用标题带
//! 高度)。净效果是兄弟之间1px缝隙、层层3px外框和19px标题带。

use crate::models::market::TradeRecord;
use crate::treemap::label;
use crate::treemap::weight::WeightedNode;

/// 矩形，x1/y1为右下边界
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    fn rounded(&self) -> Rect {
        Rect::new(self.x0.round(), self.y0.round(), self.x1.round(), self.y1.round())
    }
}

/// 布局参数
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// 分组四周的外边距
    pub padding_outer: f64,
    /// 分组顶部的标题带高度
    pub padding_top: f64,
    /// 兄弟节点之间的缝隙
    pub padding_inner: f64,
    /// 布局完成后把所有坐标四舍五入为整数
    pub round: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig { padding_outer: 3.0, padding_top: 19.0, padding_inner: 1.0, round: true }
    }
}

/// 渲染视口，单位像素
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // 行情页的默认画布
        Viewport { width: 800.0, height: 1920.0 }
    }
}

/// 布局结果中的一个节点
#[derive(Debug)]
pub struct PlacedNode<'a> {
    pub name: &'a str,
    pub depth: usize,
    pub weight: f64,
    pub rect: Rect,
    pub record: Option<&'a TradeRecord>,
    pub is_leaf: bool,
}

/// 先序排列的布局结果
#[derive(Debug)]
pub struct TreemapLayout<'a> {
    pub nodes: Vec<PlacedNode<'a>>,
}

impl<'a> TreemapLayout<'a> {
    pub fn leaves(&self) -> impl Iterator<Item = &PlacedNode<'a>> {
        self.nodes.iter().filter(|n| n.is_leaf)
    }

    /// 应画标题带文字的节点，深度上限见label模块
    pub fn titled(&self) -> impl Iterator<Item = &PlacedNode<'a>> {
        self.nodes.iter().filter(|n| label::show_title(n.depth))
    }
}

/// 对标注树做一次完整布局
pub fn layout<'a>(
    root: &'a WeightedNode,
    viewport: Viewport,
    config: &LayoutConfig,
) -> TreemapLayout<'a> {
    let mut nodes = Vec::new();
    let outer = Rect::new(0.0, 0.0, viewport.width.max(0.0), viewport.height.max(0.0));
    place(root, 0, outer, 0.0, config, &mut nodes);
    if config.round {
        for node in &mut nodes {
            node.rect = node.rect.rounded();
        }
    }
    TreemapLayout { nodes }
}

// 递归定位。slot是父层铺砖分到的槽位，shrink是应向内收缩的
// 半内边距(根节点为0)。
fn place<'a>(
    node: &'a WeightedNode,
    depth: usize,
    slot: Rect,
    shrink: f64,
    config: &LayoutConfig,
    out: &mut Vec<PlacedNode<'a>>,
) {
    let mut rect =
        Rect::new(slot.x0 + shrink, slot.y0 + shrink, slot.x1 - shrink, slot.y1 - shrink);
    collapse_if_inverted(&mut rect);
    out.push(PlacedNode {
        name: &node.name,
        depth,
        weight: node.weight,
        rect,
        record: node.record.as_ref(),
        is_leaf: node.is_leaf(),
    });
    if node.is_leaf() {
        return;
    }

    let half_inner = config.padding_inner / 2.0;
    let side = config.padding_outer - half_inner;
    let mut inner = Rect::new(
        rect.x0 + side,
        rect.y0 + (config.padding_top - half_inner),
        rect.x1 - side,
        rect.y1 - side,
    );
    collapse_if_inverted(&mut inner);

    let weights: Vec<f64> = node.children.iter().map(|c| c.weight).collect();
    let slots = squarify(&weights, node.weight, inner);
    for (child, child_slot) in node.children.iter().zip(slots) {
        place(child, depth + 1, child_slot, half_inner, config, out);
    }
}

// 区间反转时坍缩到中点，保持坐标有限且x1>=x0
fn collapse_if_inverted(rect: &mut Rect) {
    if rect.x1 < rect.x0 {
        let mid = (rect.x0 + rect.x1) / 2.0;
        rect.x0 = mid;
        rect.x1 = mid;
    }
    if rect.y1 < rect.y0 {
        let mid = (rect.y0 + rect.y1) / 2.0;
        rect.y0 = mid;
        rect.y1 = mid;
    }
}

// 方形化铺砖：把region按权重比例切给每个子节点。
// 权重或面积不足时产出零面积槽位，绝不产出NaN。
fn squarify(weights: &[f64], total: f64, region: Rect) -> Vec<Rect> {
    let mut rects: Vec<Rect> = Vec::with_capacity(weights.len());
    if weights.is_empty() {
        return rects;
    }

    let area = region.area();
    if !(total > 0.0) || !(area > 0.0) {
        for _ in weights {
            rects.push(Rect::new(region.x0, region.y0, region.x0, region.y0));
        }
        return rects;
    }

    let scale = area / total;
    let areas: Vec<f64> = weights.iter().map(|w| w.max(0.0) * scale).collect();

    let mut x = region.x0;
    let mut y = region.y0;
    let mut w = region.width();
    let mut h = region.height();

    let mut row: Vec<f64> = Vec::new();
    for &item in &areas {
        if row.is_empty() {
            row.push(item);
            continue;
        }
        let side = w.min(h);
        let current = worst_aspect(&row, side);
        row.push(item);
        if worst_aspect(&row, side) > current {
            // 追加让行变差，回退并先铺出当前行
            row.pop();
            layout_row(&row, &mut x, &mut y, &mut w, &mut h, &mut rects);
            row.clear();
            row.push(item);
        }
    }
    if !row.is_empty() {
        layout_row(&row, &mut x, &mut y, &mut w, &mut h, &mut rects);
    }

    rects
}

// 行内最坏长宽比。row全为零面积时返回无穷大，让它自成一行退化处理。
fn worst_aspect(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    if !(sum > 0.0) || !(side > 0.0) {
        return f64::INFINITY;
    }
    let mut min = f64::INFINITY;
    let mut max: f64 = 0.0;
    for &a in row {
        min = min.min(a);
        max = max.max(a);
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}

// 沿剩余区域的短边铺出一整行并推进光标。
// 行尾一块吸收浮点残差，保证整行严丝合缝地占满。
fn layout_row(
    row: &[f64],
    x: &mut f64,
    y: &mut f64,
    w: &mut f64,
    h: &mut f64,
    rects: &mut Vec<Rect>,
) {
    let row_sum: f64 = row.iter().sum();
    let horizontal = *w <= *h;
    let short = if horizontal { *w } else { *h };
    if !(row_sum > 0.0) || !(short > 0.0) {
        for _ in row {
            rects.push(Rect::new(*x, *y, *x, *y));
        }
        return;
    }
    let thickness = row_sum / short;

    if horizontal {
        let mut cx = *x;
        for (i, &item) in row.iter().enumerate() {
            let len = if i + 1 == row.len() { *x + *w - cx } else { item / thickness };
            rects.push(Rect::new(cx, *y, cx + len, *y + thickness));
            cx += len;
        }
        *y += thickness;
        *h -= thickness;
    } else {
        let mut cy = *y;
        for (i, &item) in row.iter().enumerate() {
            let len = if i + 1 == row.len() { *y + *h - cy } else { item / thickness };
            rects.push(Rect::new(*x, cy, *x + thickness, cy + len));
            cy += len;
        }
        *x += thickness;
        *w -= thickness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::market::MarketNode;

    const EPS: f64 = 1e-9;

    fn leaf(name: &str, volume: f64, value: f64) -> MarketNode {
        MarketNode {
            name: name.to_string(),
            data: Some(TradeRecord {
                name: name.to_string(),
                trade_volume: volume,
                trade_value: value,
                ..TradeRecord::default()
            }),
            children: None,
        }
    }

    fn group(name: &str, children: Vec<MarketNode>) -> MarketNode {
        MarketNode { name: name.to_string(), data: None, children: Some(children) }
    }

    fn build(node: MarketNode) -> WeightedNode {
        WeightedNode::from_market(node)
    }

    fn assert_rect(rect: &Rect, expected: (f64, f64, f64, f64)) {
        assert!(
            (rect.x0 - expected.0).abs() < EPS
                && (rect.y0 - expected.1).abs() < EPS
                && (rect.x1 - expected.2).abs() < EPS
                && (rect.y1 - expected.3).abs() < EPS,
            "rect {:?} != {:?}",
            rect,
            expected
        );
    }

    #[test]
    fn single_leaf_fills_interior() {
        let tree = build(group("市場", vec![leaf("唯一", 1000.0, 1.0)]));
        let result = layout(&tree, Viewport::new(200.0, 200.0), &LayoutConfig::default());
        assert_eq!(result.nodes.len(), 2);
        assert_rect(&result.nodes[0].rect, (0.0, 0.0, 200.0, 200.0));
        // 外框3px、标题带19px
        assert_rect(&result.nodes[1].rect, (3.0, 19.0, 197.0, 197.0));
        assert!(result.nodes[1].is_leaf);
    }

    #[test]
    fn two_leaves_split_by_weight() {
        // 權重4:2，200x200視口
        let tree = build(group(
            "市場",
            vec![leaf("大", 1000.0, 500.0), leaf("小", 10.0, 10.0)],
        ));
        let config = LayoutConfig { round: false, ..LayoutConfig::default() };
        let result = layout(&tree, Viewport::new(200.0, 200.0), &config);

        let rects: Vec<&Rect> = result.leaves().map(|n| &n.rect).collect();
        assert_eq!(rects.len(), 2);
        assert_rect(rects[0], (3.0, 19.0, 132.0, 197.0));
        assert_rect(rects[1], (133.0, 19.0, 197.0, 197.0));

        // 面积比与权重比一致(同高下宽度比2:1)
        let big = rects[0].area();
        let small = rects[1].area();
        assert!(big > small);
        assert!((big / small - 129.0 / 64.0).abs() < EPS);
    }

    #[test]
    fn one_pixel_gap_between_siblings() {
        let tree = build(group(
            "市場",
            vec![leaf("大", 1000.0, 500.0), leaf("小", 10.0, 10.0)],
        ));
        let config = LayoutConfig { round: false, ..LayoutConfig::default() };
        let result = layout(&tree, Viewport::new(200.0, 200.0), &config);
        let rects: Vec<&Rect> = result.leaves().map(|n| &n.rect).collect();
        assert!((rects[1].x0 - rects[0].x1 - 1.0).abs() < EPS);
    }

    #[test]
    fn rounding_produces_integer_coordinates() {
        let tree = build(group(
            "市場",
            vec![leaf("甲", 123.0, 3.0), leaf("乙", 45678.0, 2.0), leaf("丙", 9.0, 1.0)],
        ));
        let result = layout(&tree, Viewport::new(640.0, 480.0), &LayoutConfig::default());
        for node in &result.nodes {
            assert_eq!(node.rect.x0, node.rect.x0.round());
            assert_eq!(node.rect.y0, node.rect.y0.round());
            assert_eq!(node.rect.x1, node.rect.x1.round());
            assert_eq!(node.rect.y1, node.rect.y1.round());
        }
    }

    #[test]
    fn children_stay_inside_parent() {
        let tree = build(group(
            "市場",
            vec![
                group("甲類", vec![leaf("A", 1234.0, 9.0), leaf("B", 56.0, 8.0)]),
                group("乙類", vec![leaf("C", 7.0, 7.0), leaf("D", 890123.0, 6.0)]),
                leaf("E", 4455.0, 5.0),
            ],
        ));
        let config = LayoutConfig { round: false, ..LayoutConfig::default() };
        let result = layout(&tree, Viewport::new(600.0, 400.0), &config);

        // 先序遍历里父节点先于子节点，用栈还原包含关系
        let mut stack: Vec<(usize, Rect)> = Vec::new();
        for node in &result.nodes {
            while let Some(&(depth, _)) = stack.last() {
                if depth >= node.depth {
                    stack.pop();
                } else {
                    break;
                }
            }
            if let Some(&(_, parent)) = stack.last() {
                let grown = Rect::new(
                    parent.x0 - EPS,
                    parent.y0 - EPS,
                    parent.x1 + EPS,
                    parent.y1 + EPS,
                );
                assert!(grown.contains(&node.rect), "{:?} outside {:?}", node.rect, parent);
            }
            stack.push((node.depth, node.rect));
        }
    }

    #[test]
    fn areas_proportional_to_weights() {
        let tree = build(group(
            "市場",
            vec![
                leaf("一", 9.0, 5.0),
                leaf("二", 99.0, 4.0),
                leaf("三", 999.0, 3.0),
                leaf("四", 9999.0, 2.0),
                leaf("五", 99999.0, 1.0),
            ],
        ));
        let config = LayoutConfig { round: false, ..LayoutConfig::default() };
        let result = layout(&tree, Viewport::new(600.0, 400.0), &config);

        let interior = 595.0 * 379.0;
        let total_weight = 1.0 + 2.0 + 3.0 + 4.0 + 5.0;
        let mut area_sum = 0.0;
        for node in result.leaves() {
            // 槽位面积 = 叶子矩形外扩半内边距
            let slot = Rect::new(
                node.rect.x0 - 0.5,
                node.rect.y0 - 0.5,
                node.rect.x1 + 0.5,
                node.rect.y1 + 0.5,
            );
            let expected = interior * node.weight / total_weight;
            assert!(
                (slot.area() - expected).abs() < 1e-6,
                "weight {} area {} expected {}",
                node.weight,
                slot.area(),
                expected
            );
            area_sum += slot.area();
        }
        assert!((area_sum - interior).abs() < 1e-6);
    }

    #[test]
    fn zero_weight_tree_degenerates_without_nan() {
        let bare = MarketNode { name: "殼一".to_string(), data: None, children: None };
        let bare2 = MarketNode { name: "殼二".to_string(), data: None, children: None };
        let tree = build(MarketNode {
            name: "市場".to_string(),
            data: None,
            children: Some(vec![bare, bare2]),
        });
        assert_eq!(tree.weight, 0.0);
        let result = layout(&tree, Viewport::new(200.0, 200.0), &LayoutConfig::default());
        for node in &result.nodes {
            assert!(node.rect.x0.is_finite() && node.rect.y1.is_finite());
            assert!(node.rect.width() >= 0.0);
            assert!(node.rect.height() >= 0.0);
        }
        for node in result.leaves() {
            assert_eq!(node.rect.area(), 0.0);
        }
    }

    #[test]
    fn mixed_zero_weight_sibling_collapses() {
        let mut weightless = leaf("無量", 0.0, 1.0);
        // 无纪录叶子权重为0
        weightless.data = None;
        let tree = build(group("市場", vec![leaf("有量", 1000.0, 2.0), weightless]));
        let config = LayoutConfig { round: false, ..LayoutConfig::default() };
        let result = layout(&tree, Viewport::new(300.0, 300.0), &config);
        let leaves: Vec<_> = result.leaves().collect();
        assert_eq!(leaves.len(), 2);
        let zero = leaves.iter().find(|n| n.weight == 0.0).unwrap();
        assert!(zero.rect.area() <= EPS);
        assert!(zero.rect.x0.is_finite());
        let full = leaves.iter().find(|n| n.weight > 0.0).unwrap();
        assert!(full.rect.area() > 0.0);
    }

    #[test]
    fn tiny_viewport_collapses_cleanly() {
        let tree = build(group("市場", vec![leaf("A", 1000.0, 2.0), leaf("B", 10.0, 1.0)]));
        let result = layout(&tree, Viewport::new(10.0, 10.0), &LayoutConfig::default());
        for node in &result.nodes {
            assert!(node.rect.x0.is_finite() && node.rect.x1.is_finite());
            assert!(node.rect.y0.is_finite() && node.rect.y1.is_finite());
            assert!(node.rect.width() >= 0.0 && node.rect.height() >= 0.0);
        }
    }

    #[test]
    fn nested_groups_stack_title_bands() {
        let tree = build(group(
            "市場",
            vec![group("甲類", vec![group("子類", vec![leaf("A", 1000.0, 1.0)])])],
        ));
        let result = layout(&tree, Viewport::new(400.0, 400.0), &LayoutConfig::default());
        assert_eq!(result.nodes.len(), 4);
        assert_rect(&result.nodes[0].rect, (0.0, 0.0, 400.0, 400.0));
        assert_rect(&result.nodes[1].rect, (3.0, 19.0, 397.0, 397.0));
        assert_rect(&result.nodes[2].rect, (6.0, 38.0, 394.0, 394.0));
        assert_rect(&result.nodes[3].rect, (9.0, 57.0, 391.0, 391.0));
        let depths: Vec<usize> = result.nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, [0, 1, 2, 3]);
        // 深度3的叶子不进标题带
        assert_eq!(result.titled().count(), 3);
    }

    #[test]
    fn sibling_order_is_taken_as_given() {
        // 排序阶段把高成交金额排前，布局不得重排
        let tree = build(group(
            "市場",
            vec![leaf("冷門", 100.0, 1.0), leaf("熱門", 100.0, 9999.0)],
        ));
        let config = LayoutConfig { round: false, ..LayoutConfig::default() };
        let result = layout(&tree, Viewport::new(200.0, 200.0), &config);
        let leaves: Vec<_> = result.leaves().collect();
        assert_eq!(leaves[0].name, "熱門");
        // 同权重时先铺的在左/上
        assert!(leaves[0].rect.x0 <= leaves[1].rect.x0 && leaves[0].rect.y0 <= leaves[1].rect.y0);
    }
}
