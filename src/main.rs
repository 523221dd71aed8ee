//! Sensu Rocket.Chat Handler CLI
//!
//! 从 stdin 读取一个 Sensu 事件并发送到 Rocket.Chat 频道

use anyhow::Result;
use clap::Parser;
use sensu_rocketchat_handler::cli::{handle_event, HandlerArgs};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug sensu-rocketchat-handler -w https://chat.example.com
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sensu_rocketchat_handler=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let args = HandlerArgs::parse();
    handle_event(args)?;

    Ok(())
}
