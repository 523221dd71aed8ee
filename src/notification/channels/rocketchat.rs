//! Rocket.Chat REST 渠道
//!
//! 使用两个接口：
//! - `POST /api/v1/login` 获取 `userId` / `authToken`
//! - `POST /api/v1/chat.postMessage` 发送消息

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{HandlerError, Result};
use crate::notification::channel::{ChatBackend, Credentials, SendResult};
use crate::notification::payload::Payload;

pub const LOGIN_PATH: &str = "/api/v1/login";
pub const POST_MESSAGE_PATH: &str = "/api/v1/chat.postMessage";

/// 服务器连接参数（scheme / host / port）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
}

impl Default for ServerEndpoint {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: String::new(),
            port: None,
        }
    }
}

impl ServerEndpoint {
    /// 从配置的 url 解析连接参数
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: String| HandlerError::InvalidUrl {
            url: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("missing host".to_string()))?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            port: url.port(),
        })
    }

    /// `scheme://host[:port]`
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    user: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Option<LoginData>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    user_id: String,
    auth_token: String,
}

#[derive(Deserialize)]
struct PostMessageResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// 登录后的会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub auth_token: String,
}

/// Rocket.Chat REST 客户端（阻塞）
pub struct RocketChatClient {
    client: reqwest::blocking::Client,
    endpoint: ServerEndpoint,
    session: Option<Session>,
}

impl RocketChatClient {
    /// 创建客户端，使用 reqwest 默认超时
    pub fn new(endpoint: ServerEndpoint) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| HandlerError::DispatchFailure(format!("cannot create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            session: None,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// 主机为空（url 解析失败后的默认参数）时无法构造请求地址
    fn url(&self, path: &str) -> std::result::Result<String, String> {
        if self.endpoint.host.is_empty() {
            return Err("no server host configured".to_string());
        }
        Ok(format!("{}{}", self.endpoint.base_url(), path))
    }
}

impl ChatBackend for RocketChatClient {
    fn name(&self) -> &str {
        "rocketchat"
    }

    fn login(&mut self, credentials: &Credentials) -> Result<()> {
        let url = self.url(LOGIN_PATH).map_err(HandlerError::AuthenticationFailure)?;
        debug!(url = %url, username = %credentials.username, "Logging in to Rocket.Chat");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                user: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .map_err(|e| HandlerError::AuthenticationFailure(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| HandlerError::AuthenticationFailure(format!("failed to read response: {}", e)))?;

        let parsed: Option<LoginResponse> = serde_json::from_str(&body).ok();
        let reason = parsed
            .as_ref()
            .and_then(|r| r.message.clone().or_else(|| r.error.clone()))
            .unwrap_or_else(|| body.clone());

        if !status.is_success() {
            return Err(HandlerError::AuthenticationFailure(format!("{}: {}", status, reason)));
        }

        match parsed {
            Some(LoginResponse {
                status: login_status,
                data: Some(data),
                ..
            }) if login_status == "success" => {
                info!(user_id = %data.user_id, "Logged in to Rocket.Chat");
                self.session = Some(Session {
                    user_id: data.user_id,
                    auth_token: data.auth_token,
                });
                Ok(())
            }
            _ => Err(HandlerError::AuthenticationFailure(reason)),
        }
    }

    fn send(&self, payload: &Payload) -> Result<SendResult> {
        let url = self.url(POST_MESSAGE_PATH).map_err(HandlerError::DispatchFailure)?;
        debug!(url = %url, channel = %payload.channel, authenticated = self.session.is_some(), "Posting message");

        let mut request = self.client.post(&url).json(payload);
        if let Some(session) = &self.session {
            request = request
                .header("X-Auth-Token", &session.auth_token)
                .header("X-User-Id", &session.user_id);
        }

        let response = request
            .send()
            .map_err(|e| HandlerError::DispatchFailure(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| HandlerError::DispatchFailure(format!("failed to read response: {}", e)))?;

        let parsed: Option<PostMessageResponse> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let reason = parsed.and_then(|r| r.error).unwrap_or(body);
            return Err(HandlerError::DispatchFailure(format!("API error ({}): {}", status, reason)));
        }

        match parsed {
            Some(r) if r.success => {
                info!(channel = %payload.channel, "Message sent to Rocket.Chat");
                Ok(SendResult::Sent)
            }
            Some(r) => Err(HandlerError::DispatchFailure(
                r.error.unwrap_or_else(|| "unknown error".to_string()),
            )),
            None => Err(HandlerError::DispatchFailure(format!(
                "failed to parse response: {}",
                body
            ))),
        }
    }
}
