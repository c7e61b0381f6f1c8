//! 聊天室实体定义

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::ChatId;

/// 聊天室实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub name: String,
}

impl Chat {
    pub fn new(id: ChatId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::invalid_argument("name", "cannot be empty"));
        }
        if name.len() > 100 {
            return Err(DomainError::invalid_argument("name", "too long"));
        }
        Ok(Self { id, name })
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::invalid_argument("name", "cannot be empty"));
        }
        self.name = name;
        Ok(())
    }
}
