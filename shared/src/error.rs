use thiserror::Error;

// =========================================================
// 令牌解码错误
// =========================================================

/// Claims 解码失败的原因
///
/// 调用方一律把它当作“无身份”处理，不会向上传播。
#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// =========================================================
// API 错误
// =========================================================

/// 远端 API 调用错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 请求构建失败（序列化请求体等）
    #[error("failed to build request: {0}")]
    Request(String),
    /// 网络层失败，未拿到任何响应
    #[error("network error: {0}")]
    Network(String),
    /// 非 2xx 响应，`message` 来自响应体 `{message}`
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    /// 2xx 响应但响应体无法解析
    #[error("malformed response: {0}")]
    Parse(String),
    /// 需要认证的请求但当前没有令牌
    #[error("no session token")]
    Unauthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 服务端提供的错误消息（若有且非空）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// 面向用户的消息：优先原样展示服务端消息，否则使用固定文案
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
