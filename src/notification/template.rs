//! 描述模板 - 最小化的 `{{ .Field.Path }}` 占位符替换
//!
//! 只支持固定的事件字段，不支持函数、管道或条件语句。

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::event::Event;

/// 匹配 `{{ ... }}` 占位符（内部不含花括号）
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").expect("placeholder pattern is valid"));

/// 模板渲染错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("malformed template at byte {position}: {reason}")]
    Malformed { position: usize, reason: &'static str },

    #[error("unknown field {0:?}")]
    UnknownField(String),
}

/// 用事件字段渲染模板
pub fn render(template: &str, event: &Event) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for found in PLACEHOLDER.find_iter(template) {
        let literal = &template[last..found.start()];
        check_literal(literal, last)?;
        if literal.ends_with('{') {
            return Err(TemplateError::Malformed {
                position: found.start() - 1,
                reason: "unexpected \"{\" before action",
            });
        }
        rendered.push_str(literal);

        let text = found.as_str();
        let path = text[2..text.len() - 2].trim();
        if path.is_empty() {
            return Err(TemplateError::Malformed {
                position: found.start(),
                reason: "empty placeholder",
            });
        }
        rendered.push_str(&field_value(event, path)?);
        last = found.end();
    }

    let tail = &template[last..];
    check_literal(tail, last)?;
    rendered.push_str(tail);

    Ok(rendered)
}

/// 占位符之外不允许残留未闭合的 `{{`；单独的 `}}` 按普通文本输出
fn check_literal(literal: &str, offset: usize) -> Result<(), TemplateError> {
    if let Some(idx) = literal.find("{{") {
        return Err(TemplateError::Malformed {
            position: offset + idx,
            reason: "unclosed action",
        });
    }
    Ok(())
}

fn field_value(event: &Event, path: &str) -> Result<String, TemplateError> {
    let value = match path {
        ".Entity.Name" | ".Entity.Metadata.Name" => event.entity.metadata.name.clone(),
        ".Entity.Namespace" | ".Entity.Metadata.Namespace" => {
            event.entity.metadata.namespace.clone()
        }
        ".Check.Name" | ".Check.Metadata.Name" => event.check.metadata.name.clone(),
        ".Check.Namespace" | ".Check.Metadata.Namespace" => event.check.metadata.namespace.clone(),
        ".Check.Output" => event.check.output.clone(),
        ".Check.Status" => event.check.status.to_string(),
        ".Timestamp" => event.timestamp.unwrap_or(0).to_string(),
        other => return Err(TemplateError::UnknownField(other.to_string())),
    };
    Ok(value)
}
