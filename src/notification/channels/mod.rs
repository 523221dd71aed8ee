//! 具体渠道实现

pub mod rocketchat;

pub use rocketchat::{RocketChatClient, ServerEndpoint, Session};
