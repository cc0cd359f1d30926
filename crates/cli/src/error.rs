use api_types::error::ErrorCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error("backend error {code}: {1}", code = .0.id())]
    Backend(ErrorCode, String),
    #[error("invalid payload: {0}")]
    Validation(String),
}

impl From<engine::IntegrityError> for AppError {
    fn from(value: engine::IntegrityError) -> Self {
        Self::Engine(value.into())
    }
}

impl From<engine::NavigationError> for AppError {
    fn from(value: engine::NavigationError) -> Self {
        Self::Engine(value.into())
    }
}
