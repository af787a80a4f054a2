pub mod page;
pub mod svg;

pub use page::render_page;
pub use svg::{render_empty, render_svg, NO_DATA_NOTICE};
