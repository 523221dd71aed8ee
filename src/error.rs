//! Handler 错误类型

use thiserror::Error;

use crate::notification::template::TemplateError;

/// Handler 统一错误
///
/// 在默认的 best-effort 策略下，只有 `MissingRequiredConfig`、`InvalidEvent`
/// 和 `DispatchFailure` 会作为最终结果返回，其余错误记录日志后继续发送。
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("--{flag} or {env} environment variable is required")]
    MissingRequiredConfig {
        flag: &'static str,
        env: &'static str,
    },

    #[error("invalid Rocket.Chat url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Rocket.Chat login failed: {0}")]
    AuthenticationFailure(String),

    #[error("error processing template: {0}")]
    TemplateRender(#[from] TemplateError),

    #[error("failed to send message: {0}")]
    DispatchFailure(String),

    #[error("invalid event: {0}")]
    InvalidEvent(String),
}

pub type Result<T> = std::result::Result<T, HandlerError>;
