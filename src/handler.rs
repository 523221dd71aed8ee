//! 事件处理流水线：格式化 → 组装 payload → 分发

use tracing::info;

use crate::config::HandlerConfig;
use crate::error::Result;
use crate::event::Event;
use crate::notification::formatter::{self, FormattedMessage};
use crate::notification::{Dispatcher, Payload, PayloadBuilder, SendResult};

/// 单次事件处理器
pub struct EventHandler {
    config: HandlerConfig,
    dispatcher: Dispatcher,
}

impl EventHandler {
    pub fn new(config: HandlerConfig, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }

    /// 格式化事件
    ///
    /// fail-fast 策略下模板错误直接返回，否则记录日志并使用空描述。
    pub fn format(&self, event: &Event) -> Result<FormattedMessage> {
        let template = &self.config.description_template;
        if self.dispatcher.policy().is_fail_fast() {
            let description = formatter::description(event, template)?;
            Ok(FormattedMessage::with_description(event, description))
        } else {
            Ok(FormattedMessage::from_event(event, template))
        }
    }

    /// 构建发送给 Rocket.Chat 的 payload
    pub fn build_payload(&self, event: &Event) -> Result<Payload> {
        let formatted = self.format(event)?;
        Ok(PayloadBuilder::new(&self.config.channel).build(event, &formatted))
    }

    /// 处理一个事件
    pub fn handle(&self, event: &Event) -> Result<SendResult> {
        info!(
            entity = %event.entity_name(),
            check = %event.check_name(),
            status = event.check.status,
            message = %formatter::message(event),
            "Handling event"
        );

        let payload = self.build_payload(event)?;
        self.dispatcher.dispatch(&self.config, &payload)
    }
}
