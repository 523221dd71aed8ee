//! Sensu 事件模型
//!
//! 只解析 handler 需要的字段，其余字段忽略。

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{HandlerError, Result};

/// 对象元数据（name / namespace）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// 被监控的实体（主机/资源）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub metadata: ObjectMeta,
}

/// 检查结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Check {
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// 0 = OK, 1 = WARNING, >=2 = CRITICAL
    #[serde(default)]
    pub status: u32,
    #[serde(default)]
    pub output: String,
}

/// 监控事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub entity: Entity,
    pub check: Check,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Event {
    /// 创建状态为 OK、输出为空的事件
    pub fn new(entity: impl Into<String>, check: impl Into<String>) -> Self {
        Self {
            entity: Entity {
                metadata: ObjectMeta {
                    name: entity.into(),
                    namespace: "default".to_string(),
                },
            },
            check: Check {
                metadata: ObjectMeta {
                    name: check.into(),
                    namespace: "default".to_string(),
                },
                status: 0,
                output: String::new(),
            },
            timestamp: None,
        }
    }

    pub fn with_status(mut self, status: u32) -> Self {
        self.check.status = status;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.check.output = output.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn entity_name(&self) -> &str {
        &self.entity.metadata.name
    }

    pub fn check_name(&self) -> &str {
        &self.check.metadata.name
    }

    /// 从 JSON 读取并校验事件（通常是 stdin）
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let event: Event = serde_json::from_reader(reader)
            .map_err(|e| HandlerError::InvalidEvent(format!("failed to parse event: {}", e)))?;
        event.validate()?;
        Ok(event)
    }

    /// 校验 entity 和 check 名称存在
    pub fn validate(&self) -> Result<()> {
        if self.entity_name().is_empty() {
            return Err(HandlerError::InvalidEvent("entity name is missing".to_string()));
        }
        if self.check_name().is_empty() {
            return Err(HandlerError::InvalidEvent("check name is missing".to_string()));
        }
        Ok(())
    }
}
