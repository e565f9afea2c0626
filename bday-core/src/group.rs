//! WhatsApp groups that birthday notifications are sent to.

use serde::{Deserialize, Serialize};

use crate::error::{BdayError, BdayResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(alias = "group_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "memberCount", skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
}

impl Group {
    pub fn new(id: String, new: NewGroup) -> Self {
        Group {
            id,
            name: new.name.trim().to_string(),
            description: new.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            member_count: new.member_count,
        }
    }

    pub fn apply(&mut self, update: GroupUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            let description = description.trim();
            self.description = (!description.is_empty()).then(|| description.to_string());
        }
        if let Some(count) = update.member_count {
            self.member_count = Some(count);
        }
    }

    pub fn validate(&self) -> BdayResult<()> {
        if self.name.trim().is_empty() {
            return Err(BdayError::Validation("Group name is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
    pub member_count: Option<u32>,
}

/// A merge-style update: only `Some` fields change.
#[derive(Debug, Clone, Default)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub member_count: Option<u32>,
}

impl GroupUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.member_count.is_none()
    }
}
