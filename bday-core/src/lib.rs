//! Core library for bday.
//!
//! - `date`: birth dates, anniversaries, ages
//! - `birthday` / `group`: the two record types
//! - `upcoming`: the upcoming-birthday filter
//! - `store`: the storage capability and its local/remote backends
//! - `book`: validation and guards on top of a store
//! - `config`: ~/.config/bday/config.toml

pub mod birthday;
pub mod book;
pub mod config;
pub mod date;
pub mod error;
pub mod group;
pub mod snapshot;
pub mod store;
pub mod upcoming;

pub use birthday::{Birthday, BirthdayUpdate, NewBirthday};
pub use book::{BirthdayBook, group_name};
pub use config::{BackendKind, BdayConfig};
pub use date::{BirthDate, MonthDay};
pub use error::{BdayError, BdayResult};
pub use group::{Group, GroupUpdate, NewGroup};
pub use snapshot::Snapshot;
pub use store::{Backend, BirthdayStore, LocalStore, RemoteStore};
pub use upcoming::{DEFAULT_UPCOMING_DAYS, Upcoming};
