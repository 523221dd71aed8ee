//! Sensu Rocket.Chat Handler - 将监控事件转发到 Rocket.Chat 频道

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod notification;

pub use config::{resolve_option, ConfigOptions, HandlerConfig};
pub use error::{HandlerError, Result};
pub use event::{Check, Entity, Event, ObjectMeta};
pub use handler::EventHandler;
pub use notification::{
    ChatBackend, Credentials, DeliveryPolicy, Dispatcher, FormattedMessage, Payload, PayloadBuilder,
    RocketChatClient, SendResult, ServerEndpoint, TemplateError,
};
