//! 通知层 - 把监控事件格式化并发送到聊天渠道
//!
//! # 流程
//! 1. `formatter` 从事件派生 action / key / summary / color / status / description
//! 2. `payload` 组装 `chat.postMessage` 请求体
//! 3. `dispatcher` 解析服务器地址、登录、发送
//!
//! # 使用示例
//! ```ignore
//! use sensu_rocketchat_handler::notification::{Dispatcher, DeliveryPolicy, FormattedMessage, PayloadBuilder};
//!
//! let formatted = FormattedMessage::from_event(&event, &config.description_template);
//! let payload = PayloadBuilder::new(&config.channel).build(&event, &formatted);
//! Dispatcher::new(DeliveryPolicy::BestEffort).dispatch(&config, &payload)?;
//! ```

pub mod channel;
pub mod channels;
pub mod dispatcher;
pub mod formatter;
pub mod payload;
pub mod template;

pub use channel::{ChatBackend, Credentials, SendResult};
pub use channels::{RocketChatClient, ServerEndpoint};
pub use dispatcher::{DeliveryPolicy, Dispatcher};
pub use formatter::FormattedMessage;
pub use payload::{Attachment, AttachmentField, Payload, PayloadBuilder};
pub use template::TemplateError;
