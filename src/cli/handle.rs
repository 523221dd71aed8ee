//! Handler 命令行参数和入口

use std::io::Read;

use clap::Parser;
use tracing::{debug, info};

use crate::config::{
    ConfigOptions, HandlerConfig, DEFAULT_CHANNEL, DEFAULT_PASSWORD, DEFAULT_TEMPLATE, DEFAULT_URL,
    DEFAULT_USERNAME,
};
use crate::error::Result;
use crate::event::Event;
use crate::handler::EventHandler;
use crate::notification::{DeliveryPolicy, Dispatcher, SendResult};

/// Handler 命令行参数
#[derive(Parser, Debug, Clone)]
#[command(name = "sensu-rocketchat-handler")]
#[command(about = "The Sensu Go Rocketchat handler for notifying a channel")]
#[command(version)]
pub struct HandlerArgs {
    /// The Rocket.Chat server url to send messages to
    #[arg(short = 'w', long, default_value = DEFAULT_URL, hide_default_value = true)]
    pub url: String,

    /// The channel to post messages to
    #[arg(short = 'c', long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// The username that messages will be sent as
    #[arg(short = 'u', long, default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// The password used to log in
    #[arg(short = 'p', long, default_value = DEFAULT_PASSWORD, hide_default_value = true)]
    pub password: String,

    /// The Rocket.Chat description template, e.g. "{{ .Entity.Name }}: {{ .Check.Output }}"
    #[arg(short = 't', long, default_value = DEFAULT_TEMPLATE)]
    pub description_template: String,

    /// How url, login and template errors are handled
    #[arg(long, value_enum, default_value_t = DeliveryPolicy::BestEffort)]
    pub delivery_policy: DeliveryPolicy,

    /// Print the payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl HandlerArgs {
    pub fn config_options(&self) -> ConfigOptions {
        ConfigOptions {
            url: self.url.clone(),
            channel: self.channel.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            description_template: self.description_template.clone(),
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.delivery_policy).with_dry_run(self.dry_run)
    }
}

/// 解析配置、从 stdin 读取事件并发送
pub fn handle_event(args: HandlerArgs) -> Result<SendResult> {
    handle_event_from(args, std::io::stdin().lock(), |name| std::env::var(name).ok())
}

/// 从指定输入读取事件并发送
///
/// `env` 按变量名查找环境变量，与 [`HandlerConfig::resolve`] 相同。
pub fn handle_event_from<R, F>(args: HandlerArgs, reader: R, env: F) -> Result<SendResult>
where
    R: Read,
    F: Fn(&str) -> Option<String>,
{
    let config = HandlerConfig::resolve(args.config_options(), env)?;
    debug!(?config, policy = ?args.delivery_policy, "Resolved configuration");

    let event = Event::from_reader(reader)?;

    let handler = EventHandler::new(config, args.dispatcher());
    let result = handler.handle(&event)?;
    info!(?result, "Event handled");
    Ok(result)
}
