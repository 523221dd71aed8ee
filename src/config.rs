//! 配置解析 - 合并命令行参数、环境变量和默认值
//!
//! 优先级规则：
//! 1. 显式设置的非默认值优先
//! 2. 环境变量（非空）覆盖仍等于默认值的选项
//! 3. 内置默认值

use std::fmt;

use crate::error::{HandlerError, Result};

pub const URL_FLAG: &str = "url";

pub const URL_ENV: &str = "ROCKETCHAT_URL";
pub const CHANNEL_ENV: &str = "ROCKETCHAT_CHANNEL";
pub const USERNAME_ENV: &str = "ROCKETCHAT_USERNAME";
pub const PASSWORD_ENV: &str = "ROCKETCHAT_PASSWORD";
pub const DESCRIPTION_TEMPLATE_ENV: &str = "ROCKETCHAT_DESCRIPTION_TEMPLATE";

pub const DEFAULT_URL: &str = "";
pub const DEFAULT_CHANNEL: &str = "general";
pub const DEFAULT_USERNAME: &str = "servicep";
pub const DEFAULT_PASSWORD: &str = "";
pub const DEFAULT_TEMPLATE: &str = "{{ .Check.Output }}";

/// 原始选项值（命令行解析后、环境变量合并前）
#[derive(Clone, PartialEq)]
pub struct ConfigOptions {
    pub url: String,
    pub channel: String,
    pub username: String,
    pub password: String,
    pub description_template: String,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            description_template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl fmt::Debug for ConfigOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOptions")
            .field("url", &self.url)
            .field("channel", &self.channel)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("description_template", &self.description_template)
            .finish()
    }
}

/// 合并后的最终配置，构建后只读
#[derive(Clone, PartialEq)]
pub struct HandlerConfig {
    pub url: String,
    pub channel: String,
    pub username: String,
    pub password: String,
    pub description_template: String,
}

impl HandlerConfig {
    /// 从选项和环境变量解析配置
    ///
    /// `env` 按变量名查找环境变量，测试时可传入闭包替代进程环境。
    pub fn resolve<F>(options: ConfigOptions, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            url: resolve_option(options.url, DEFAULT_URL, env(URL_ENV)),
            channel: resolve_option(options.channel, DEFAULT_CHANNEL, env(CHANNEL_ENV)),
            username: resolve_option(options.username, DEFAULT_USERNAME, env(USERNAME_ENV)),
            password: resolve_option(options.password, DEFAULT_PASSWORD, env(PASSWORD_ENV)),
            description_template: resolve_option(
                options.description_template,
                DEFAULT_TEMPLATE,
                env(DESCRIPTION_TEMPLATE_ENV),
            ),
        };

        if config.url.is_empty() {
            return Err(HandlerError::MissingRequiredConfig {
                flag: URL_FLAG,
                env: URL_ENV,
            });
        }

        Ok(config)
    }
}

impl fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerConfig")
            .field("url", &self.url)
            .field("channel", &self.channel)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("description_template", &self.description_template)
            .finish()
    }
}

/// 单个选项的优先级合并
///
/// 环境变量非空且当前值仍等于默认值时，环境变量生效；否则保留当前值。
pub fn resolve_option(current: String, default: &str, env: Option<String>) -> String {
    match env {
        Some(value) if !value.is_empty() && current == default => value,
        _ => current,
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "********"
    }
}
