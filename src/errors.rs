use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketMapError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, MarketMapError>;

// 用于从字符串创建错误
impl From<String> for MarketMapError {
    fn from(s: String) -> Self {
        MarketMapError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for MarketMapError {
    fn from(s: &str) -> Self {
        MarketMapError::Unknown(s.to_string())
    }
}
