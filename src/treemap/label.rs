//! 标签规则：叶子标签按可读尺寸门槛取舍，标题带只画到第三层

/// 叶子标签的最小可读宽度
pub const LEAF_LABEL_MIN_WIDTH: f64 = 20.0;
/// 叶子标签的最小可读高度
pub const LEAF_LABEL_MIN_HEIGHT: f64 = 8.0;
/// 叶子标签相对矩形左上角的锚点偏移
pub const LEAF_LABEL_DX: f64 = 1.0;
pub const LEAF_LABEL_DY: f64 = 7.0;
pub const LEAF_LABEL_FONT_PX: u32 = 8;

/// 标题带的深度上限(不含)
pub const TITLE_MAX_DEPTH: usize = 3;
/// 标题相对矩形左上角的锚点偏移
pub const TITLE_DX: f64 = 2.0;
pub const TITLE_DY: f64 = 16.0;
pub const TITLE_FONT_PX: u32 = 10;

/// 矩形够大才显示叶子标签，否则给空串。文本节点仍然输出，
/// 悬停目标因此保持稳定。
pub fn leaf_label<'a>(name: &'a str, width: f64, height: f64) -> &'a str {
    if width >= LEAF_LABEL_MIN_WIDTH && height >= LEAF_LABEL_MIN_HEIGHT {
        name
    } else {
        ""
    }
}

/// 深度0/1/2的节点无条件带标题
pub fn show_title(depth: usize) -> bool {
    depth < TITLE_MAX_DEPTH
}
