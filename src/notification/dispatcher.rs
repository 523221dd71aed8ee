//! 通知分发器 - 解析服务器地址、登录并发送消息
//!
//! 流程是线性的：Configured → Authenticated（尽力而为）→ Sent | Failed，
//! 没有重试。

use tracing::{info, warn};

use super::channel::{ChatBackend, Credentials, SendResult};
use super::channels::rocketchat::{RocketChatClient, ServerEndpoint};
use super::payload::Payload;
use crate::config::HandlerConfig;
use crate::error::Result;

/// 中间错误的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DeliveryPolicy {
    /// 记录 url 解析、登录、模板错误后继续发送
    #[default]
    BestEffort,
    /// 任何中间错误都直接返回
    FailFast,
}

impl DeliveryPolicy {
    pub fn is_fail_fast(&self) -> bool {
        matches!(self, DeliveryPolicy::FailFast)
    }
}

/// 通知分发器
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    policy: DeliveryPolicy,
    dry_run: bool,
}

impl Dispatcher {
    pub fn new(policy: DeliveryPolicy) -> Self {
        Self {
            policy,
            dry_run: false,
        }
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// 解析 url 得到连接参数
    ///
    /// best-effort 下解析失败只记录日志，返回默认参数（后续请求会失败）。
    pub fn resolve_endpoint(&self, url: &str) -> Result<ServerEndpoint> {
        match ServerEndpoint::parse(url) {
            Ok(endpoint) => Ok(endpoint),
            Err(e) if self.policy.is_fail_fast() => Err(e),
            Err(e) => {
                warn!(error = %e, "Invalid Rocket.Chat url, continuing with default connection parameters");
                Ok(ServerEndpoint::default())
            }
        }
    }

    /// 发送到 Rocket.Chat
    ///
    /// url 在 dry-run 之前解析，fail-fast 下 dry-run 同样会拒绝无效 url。
    pub fn dispatch(&self, config: &HandlerConfig, payload: &Payload) -> Result<SendResult> {
        let endpoint = self.resolve_endpoint(&config.url)?;

        if self.dry_run {
            match serde_json::to_string_pretty(payload) {
                Ok(json) => println!("{}", json),
                Err(e) => warn!(error = %e, "Failed to render payload"),
            }
            eprintln!("[DRY-RUN] Would send to channel: {}", payload.channel);
            return Ok(SendResult::Skipped("dry-run".to_string()));
        }

        let mut client = RocketChatClient::new(endpoint)?;
        let credentials = Credentials::new(&config.username, &config.password);

        self.dispatch_with(&mut client, &credentials, payload)
    }

    /// 使用指定后端登录并发送
    pub fn dispatch_with<B>(
        &self,
        backend: &mut B,
        credentials: &Credentials,
        payload: &Payload,
    ) -> Result<SendResult>
    where
        B: ChatBackend + ?Sized,
    {
        if let Err(e) = backend.login(credentials) {
            if self.policy.is_fail_fast() {
                return Err(e);
            }
            warn!(backend = backend.name(), error = %e, "Login failed, attempting to send anyway");
        }

        let result = backend.send(payload)?;
        info!(backend = backend.name(), channel = %payload.channel, ?result, "Dispatch finished");
        Ok(result)
    }
}
