//! 树状图流水线：权重标注 -> 同层排序 -> 铺砖布局 -> 配色标注
//!
//! 整个流水线是纯函数式的：输入一棵快照树和视口，输出一组矩形。
//! I/O都在loader和services层，这里不碰文件与网络。

pub mod color;
pub mod label;
pub mod layout;
pub mod tooltip;
pub mod weight;

pub use color::{change_color, Rgb};
pub use layout::{layout, LayoutConfig, PlacedNode, Rect, TreemapLayout, Viewport};
pub use weight::{volume_weight, WeightedNode};
