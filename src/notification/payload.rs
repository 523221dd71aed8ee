//! Payload 构建模块 - 创建 Rocket.Chat `chat.postMessage` 请求体
//!
//! Payload 格式：
//! ```json
//! {
//!   "channel": "#general",
//!   "alias": "Sensu",
//!   "text": "disk is full",
//!   "attachments": [{
//!     "title": "Description",
//!     "text": "disk is full",
//!     "color": "danger",
//!     "fallback": "ALERT - entity1/check1:disk is full",
//!     "fields": [
//!       {"title": "Status", "value": "Critical", "short": false},
//!       {"title": "Entity", "value": "entity1", "short": true},
//!       {"title": "Check", "value": "check1", "short": true}
//!     ]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::formatter::FormattedMessage;
use crate::event::Event;

/// 发送方别名
pub const ALIAS: &str = "Sensu";
pub const ATTACHMENT_TITLE: &str = "Description";

/// 附件中的展示字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl AttachmentField {
    pub fn new(title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short,
        }
    }
}

/// 消息附件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    pub text: String,
    pub color: String,
    pub fallback: String,
    pub fields: Vec<AttachmentField>,
}

/// 发送到 Rocket.Chat 的消息体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub channel: String,
    pub alias: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

/// Payload 构建器
pub struct PayloadBuilder {
    channel: String,
}

impl PayloadBuilder {
    /// 创建构建器，频道名缺少 `#`/`@` 前缀时补 `#`
    pub fn new(channel: &str) -> Self {
        Self {
            channel: normalize_channel(channel),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// 构建附件（Status / Entity / Check 三个字段始终存在）
    pub fn build_attachment(event: &Event, formatted: &FormattedMessage) -> Attachment {
        Attachment {
            title: ATTACHMENT_TITLE.to_string(),
            text: formatted.description.clone(),
            color: formatted.color.to_string(),
            fallback: formatted.message.clone(),
            fields: vec![
                AttachmentField::new("Status", formatted.status, false),
                AttachmentField::new("Entity", event.entity_name(), true),
                AttachmentField::new("Check", event.check_name(), true),
            ],
        }
    }

    /// 构建完整 payload
    pub fn build(&self, event: &Event, formatted: &FormattedMessage) -> Payload {
        Payload {
            channel: self.channel.clone(),
            alias: ALIAS.to_string(),
            text: formatted.description.clone(),
            attachments: vec![Self::build_attachment(event, formatted)],
        }
    }
}

fn normalize_channel(channel: &str) -> String {
    if channel.starts_with('#') || channel.starts_with('@') {
        channel.to_string()
    } else {
        format!("#{}", channel)
    }
}
