//! Whole-dataset export and import.

use serde::{Deserialize, Serialize};

use crate::birthday::Birthday;
use crate::group::Group;

/// Every birthday and group, as written by `export` and read by `import`.
///
/// A list left out of an imported snapshot is not touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdays: Option<Vec<Birthday>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,
}

impl Snapshot {
    pub fn new(birthdays: Vec<Birthday>, groups: Vec<Group>) -> Self {
        Snapshot {
            birthdays: Some(birthdays),
            groups: Some(groups),
        }
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Body of `POST /test-message`.
#[derive(Debug, Clone, Serialize)]
pub struct TestMessage {
    pub group_id: String,
    pub message: String,
}
