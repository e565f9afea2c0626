//! Storage backends for birthdays and groups.
//!
//! [`BirthdayStore`] is the one persistence capability the rest of bday
//! talks to. Two adapters implement it:
//! - [`LocalStore`]: JSON entries in a local data directory
//! - [`RemoteStore`]: the REST API gateway
//!
//! [`Backend`] picks one of them from configuration at startup.

mod local;
mod remote;
mod seed;

pub use local::LocalStore;
pub use remote::RemoteStore;

use crate::birthday::Birthday;
use crate::config::{BackendKind, BdayConfig};
use crate::error::{BdayError, BdayResult};
use crate::group::Group;
use crate::snapshot::{Snapshot, TestMessage};

/// Raw record storage. Validation and the group deletion guard live in
/// [`crate::book::BirthdayBook`], not here.
#[allow(async_fn_in_trait)]
pub trait BirthdayStore {
    async fn list_birthdays(&self) -> BdayResult<Vec<Birthday>>;

    /// Store a new birthday. The store assigns the id; `draft.id` is ignored.
    async fn add_birthday(&mut self, draft: Birthday) -> BdayResult<Birthday>;

    /// Replace the stored record that has `birthday.id`.
    async fn update_birthday(&mut self, birthday: Birthday) -> BdayResult<Birthday>;

    async fn delete_birthday(&mut self, id: &str) -> BdayResult<()>;

    async fn list_groups(&self) -> BdayResult<Vec<Group>>;

    /// Store a new group. The store assigns the id; `draft.id` is ignored.
    async fn add_group(&mut self, draft: Group) -> BdayResult<Group>;

    async fn update_group(&mut self, group: Group) -> BdayResult<Group>;

    async fn delete_group(&mut self, id: &str) -> BdayResult<()>;

    /// Overwrite the lists present in `snapshot`.
    async fn import(&mut self, _snapshot: Snapshot) -> BdayResult<()> {
        Err(BdayError::Unsupported("Importing data"))
    }

    /// Drop everything stored.
    async fn clear(&mut self) -> BdayResult<()> {
        Err(BdayError::Unsupported("Clearing storage"))
    }

    async fn send_test_message(&self, _message: &TestMessage) -> BdayResult<serde_json::Value> {
        Err(BdayError::Unsupported("Sending test messages"))
    }
}

/// The store selected at startup.
pub enum Backend {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Backend {
    pub fn from_config(config: &BdayConfig) -> BdayResult<Self> {
        match config.backend {
            BackendKind::Local => Ok(Backend::Local(LocalStore::open(config.data_path())?)),
            BackendKind::Remote => {
                let api_url = config.api_url.as_deref().ok_or_else(|| {
                    BdayError::Config(
                        "backend = \"remote\" needs api_url (or BDAY_API_URL) to be set".into(),
                    )
                })?;
                Ok(Backend::Remote(RemoteStore::new(api_url, config.request_timeout())?))
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Local(_) => BackendKind::Local,
            Backend::Remote(_) => BackendKind::Remote,
        }
    }
}

impl BirthdayStore for Backend {
    async fn list_birthdays(&self) -> BdayResult<Vec<Birthday>> {
        match self {
            Backend::Local(s) => s.list_birthdays().await,
            Backend::Remote(s) => s.list_birthdays().await,
        }
    }

    async fn add_birthday(&mut self, draft: Birthday) -> BdayResult<Birthday> {
        match self {
            Backend::Local(s) => s.add_birthday(draft).await,
            Backend::Remote(s) => s.add_birthday(draft).await,
        }
    }

    async fn update_birthday(&mut self, birthday: Birthday) -> BdayResult<Birthday> {
        match self {
            Backend::Local(s) => s.update_birthday(birthday).await,
            Backend::Remote(s) => s.update_birthday(birthday).await,
        }
    }

    async fn delete_birthday(&mut self, id: &str) -> BdayResult<()> {
        match self {
            Backend::Local(s) => s.delete_birthday(id).await,
            Backend::Remote(s) => s.delete_birthday(id).await,
        }
    }

    async fn list_groups(&self) -> BdayResult<Vec<Group>> {
        match self {
            Backend::Local(s) => s.list_groups().await,
            Backend::Remote(s) => s.list_groups().await,
        }
    }

    async fn add_group(&mut self, draft: Group) -> BdayResult<Group> {
        match self {
            Backend::Local(s) => s.add_group(draft).await,
            Backend::Remote(s) => s.add_group(draft).await,
        }
    }

    async fn update_group(&mut self, group: Group) -> BdayResult<Group> {
        match self {
            Backend::Local(s) => s.update_group(group).await,
            Backend::Remote(s) => s.update_group(group).await,
        }
    }

    async fn delete_group(&mut self, id: &str) -> BdayResult<()> {
        match self {
            Backend::Local(s) => s.delete_group(id).await,
            Backend::Remote(s) => s.delete_group(id).await,
        }
    }

    async fn import(&mut self, snapshot: Snapshot) -> BdayResult<()> {
        match self {
            Backend::Local(s) => s.import(snapshot).await,
            Backend::Remote(s) => s.import(snapshot).await,
        }
    }

    async fn clear(&mut self) -> BdayResult<()> {
        match self {
            Backend::Local(s) => s.clear().await,
            Backend::Remote(s) => s.clear().await,
        }
    }

    async fn send_test_message(&self, message: &TestMessage) -> BdayResult<serde_json::Value> {
        match self {
            Backend::Local(s) => s.send_test_message(message).await,
            Backend::Remote(s) => s.send_test_message(message).await,
        }
    }
}
