use crate::treemap::layout::Viewport;

pub struct Config {
    pub debug_mode: bool,
    pub debug_group_limit: usize,
    pub data_dir: String,
    pub base_url: Option<String>,
    pub output_dir: String,
    pub viewport: Viewport,
    pub emit_page: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            debug_mode: false,
            debug_group_limit: 10,
            data_dir: "data".to_string(),
            base_url: None,
            output_dir: ".".to_string(),
            viewport: Viewport::default(),
            emit_page: false,
        }
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn with_debug_group_limit(mut self, limit: usize) -> Self {
        self.debug_group_limit = limit;
        self
    }

    pub fn with_data_dir(mut self, dir: &str) -> Self {
        self.data_dir = dir.to_string();
        self
    }

    // 设置后快照改走HTTP静态站，不再读本地目录
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn with_output_dir(mut self, dir: &str) -> Self {
        self.output_dir = dir.to_string();
        self
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    // 输出带提示卡脚本的HTML页面，而不是裸SVG
    pub fn with_emit_page(mut self, emit_page: bool) -> Self {
        self.emit_page = emit_page;
        self
    }
}
