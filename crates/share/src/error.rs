use engine::EngineError;
use thiserror::Error;

/// Errors raised while encoding or decoding a share token.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("invalid share token: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid share payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid share link: {0}")]
    Url(#[from] url::ParseError),
    #[error("share link has no `calc` parameter")]
    MissingToken,
    #[error(transparent)]
    Input(#[from] EngineError),
}
