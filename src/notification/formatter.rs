//! 消息格式化模块 - 将监控事件转换为可读的通知字符串
//!
//! 所有函数都是纯函数，不依赖全局状态。

use tracing::warn;

use super::template::{self, TemplateError};
use crate::event::Event;

/// 摘要中输出的最大字符数
pub const SUMMARY_MAX_LENGTH: usize = 100;

/// 状态文本常量
pub mod msg {
    pub const ACTION_RESOLVED: &str = "RESOLVED";
    pub const ACTION_ALERT: &str = "ALERT";

    pub const COLOR_GOOD: &str = "good";
    pub const COLOR_WARNING: &str = "warning";
    pub const COLOR_DANGER: &str = "danger";

    pub const STATUS_RESOLVED: &str = "Resolved";
    pub const STATUS_WARNING: &str = "Warning";
    pub const STATUS_CRITICAL: &str = "Critical";
}

/// 事件动作：OK 为 RESOLVED，其他为 ALERT
pub fn action(event: &Event) -> &'static str {
    match event.check.status {
        0 => msg::ACTION_RESOLVED,
        _ => msg::ACTION_ALERT,
    }
}

/// 事件键 `entity/check`
pub fn key(event: &Event) -> String {
    format!("{}/{}", event.entity_name(), event.check_name())
}

/// 去掉首尾的换行和回车，内部空白保持不变
pub fn chomp(text: &str) -> &str {
    text.trim_matches('\n')
        .trim_matches('\r')
        .trim_matches(&['\r', '\n'][..])
}

/// 事件摘要 `key:output`
///
/// 原始输出（chomp 之前）超过 `max_length` 个字符时，截断 chomp 后的输出并追加 `...`。
pub fn summary(event: &Event, max_length: usize) -> String {
    let output = chomp(&event.check.output);
    let output = if event.check.output.chars().count() > max_length {
        let truncated: String = output.chars().take(max_length).collect();
        format!("{}...", truncated)
    } else {
        output.to_string()
    };
    format!("{}:{}", key(event), output)
}

/// 单行消息 `ACTION - summary`
pub fn message(event: &Event) -> String {
    format!("{} - {}", action(event), summary(event, SUMMARY_MAX_LENGTH))
}

/// 附件颜色
pub fn color(event: &Event) -> &'static str {
    match event.check.status {
        0 => msg::COLOR_GOOD,
        1 => msg::COLOR_WARNING,
        _ => msg::COLOR_DANGER,
    }
}

/// 状态标签
pub fn status(event: &Event) -> &'static str {
    match event.check.status {
        0 => msg::STATUS_RESOLVED,
        1 => msg::STATUS_WARNING,
        _ => msg::STATUS_CRITICAL,
    }
}

/// 用描述模板渲染事件
pub fn description(event: &Event, template: &str) -> Result<String, TemplateError> {
    template::render(template, event)
}

/// 一次事件处理的全部格式化结果
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedMessage {
    pub action: &'static str,
    pub key: String,
    pub summary: String,
    pub message: String,
    pub color: &'static str,
    pub status: &'static str,
    pub description: String,
}

impl FormattedMessage {
    /// 格式化事件；模板渲染失败时记录错误并使用空描述
    pub fn from_event(event: &Event, template: &str) -> Self {
        let description = description(event, template).unwrap_or_else(|e| {
            warn!(error = %e, template = %template, "Error processing template, using empty description");
            String::new()
        });
        Self::with_description(event, description)
    }

    /// 使用已渲染好的描述构造
    pub fn with_description(event: &Event, description: String) -> Self {
        Self {
            action: action(event),
            key: key(event),
            summary: summary(event, SUMMARY_MAX_LENGTH),
            message: message(event),
            color: color(event),
            status: status(event),
            description,
        }
    }
}
