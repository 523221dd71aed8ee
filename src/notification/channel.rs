//! 聊天后端 trait 定义

use std::fmt;

use super::payload::Payload;
use crate::error::Result;

/// 登录凭据
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 跳过（dry-run）
    Skipped(String),
}

/// 聊天后端 trait
///
/// 每次事件处理创建一个实例：先登录一次，再发送一条消息。
pub trait ChatBackend {
    /// 后端名称（用于日志）
    fn name(&self) -> &str;

    /// 登录；失败返回 `AuthenticationFailure`
    fn login(&mut self, credentials: &Credentials) -> Result<()>;

    /// 发送消息；失败返回 `DispatchFailure`
    fn send(&self, payload: &Payload) -> Result<SendResult>;
}
