//! The birthday book: the one object the front-end talks to.
//!
//! `BirthdayBook` owns a store and adds everything that must behave the
//! same whatever the store is: required-field validation, merge-style
//! updates, the group deletion guard and the upcoming-birthday view.

use chrono::NaiveDate;

use crate::birthday::{Birthday, BirthdayUpdate, NewBirthday};
use crate::error::{BdayError, BdayResult};
use crate::group::{Group, GroupUpdate, NewGroup};
use crate::snapshot::{Snapshot, TestMessage};
use crate::store::BirthdayStore;
use crate::upcoming::{Upcoming, upcoming};

pub struct BirthdayBook<S> {
    store: S,
}

impl<S: BirthdayStore> BirthdayBook<S> {
    pub fn new(store: S) -> Self {
        BirthdayBook { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // =========================================================================
    // Birthdays
    // =========================================================================

    pub async fn birthdays(&self) -> BdayResult<Vec<Birthday>> {
        self.store.list_birthdays().await
    }

    pub async fn birthday(&self, id: &str) -> BdayResult<Birthday> {
        self.birthdays()
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("Birthday", id))
    }

    pub async fn add_birthday(&mut self, new: NewBirthday, today: NaiveDate) -> BdayResult<Birthday> {
        let draft = Birthday::new(String::new(), new);
        draft.validate(today)?;
        self.store.add_birthday(draft).await
    }

    pub async fn update_birthday(
        &mut self,
        id: &str,
        update: BirthdayUpdate,
        today: NaiveDate,
    ) -> BdayResult<Birthday> {
        let mut birthday = self.birthday(id).await?;
        birthday.apply(update);
        birthday.validate(today)?;
        self.store.update_birthday(birthday).await
    }

    pub async fn delete_birthday(&mut self, id: &str) -> BdayResult<()> {
        self.store.delete_birthday(id).await
    }

    /// Birthdays that point at the group, by id or by its name.
    pub async fn birthdays_in_group(&self, group_id: &str) -> BdayResult<Vec<Birthday>> {
        let group = self.groups().await?.into_iter().find(|g| g.id == group_id);
        Ok(self
            .birthdays()
            .await?
            .into_iter()
            .filter(|b| match &group {
                Some(group) => b.belongs_to(group),
                None => b.group_id == group_id,
            })
            .collect())
    }

    /// Birthdays within `window_days` of `today`, soonest first.
    pub async fn upcoming(&self, today: NaiveDate, window_days: i64) -> BdayResult<Vec<Upcoming>> {
        Ok(upcoming(&self.birthdays().await?, today, window_days))
    }

    // =========================================================================
    // Groups
    // =========================================================================

    pub async fn groups(&self) -> BdayResult<Vec<Group>> {
        self.store.list_groups().await
    }

    pub async fn group(&self, id: &str) -> BdayResult<Group> {
        self.groups()
            .await?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| not_found("Group", id))
    }

    pub async fn add_group(&mut self, new: NewGroup) -> BdayResult<Group> {
        let draft = Group::new(String::new(), new);
        draft.validate()?;
        self.store.add_group(draft).await
    }

    pub async fn update_group(&mut self, id: &str, update: GroupUpdate) -> BdayResult<Group> {
        let mut group = self.group(id).await?;
        group.apply(update);
        group.validate()?;
        self.store.update_group(group).await
    }

    /// Delete a group nobody references. Fails with `GroupInUse` otherwise,
    /// leaving the group list as it was.
    pub async fn delete_group(&mut self, id: &str) -> BdayResult<()> {
        let count = self.birthdays_in_group(id).await?.len();
        if count > 0 {
            let group = self
                .groups()
                .await?
                .into_iter()
                .find(|g| g.id == id)
                .map_or_else(|| id.to_string(), |g| g.name);
            return Err(BdayError::GroupInUse { group, count });
        }
        self.store.delete_group(id).await
    }

    // =========================================================================
    // Whole dataset
    // =========================================================================

    pub async fn export(&self) -> BdayResult<Snapshot> {
        Ok(Snapshot::new(self.birthdays().await?, self.groups().await?))
    }

    pub async fn import(&mut self, snapshot: Snapshot) -> BdayResult<()> {
        self.store.import(snapshot).await
    }

    pub async fn clear(&mut self) -> BdayResult<()> {
        self.store.clear().await
    }

    pub async fn send_test_message(
        &self,
        group_id: &str,
        message: &str,
    ) -> BdayResult<serde_json::Value> {
        if message.trim().is_empty() {
            return Err(BdayError::Validation("Message is required".into()));
        }
        if group_id.trim().is_empty() {
            return Err(BdayError::Validation("Group is required".into()));
        }
        self.store
            .send_test_message(&TestMessage {
                group_id: group_id.to_string(),
                message: message.to_string(),
            })
            .await
    }
}

/// Display name for a group id, falling back to the id itself.
pub fn group_name<'a>(groups: &'a [Group], group_id: &'a str) -> &'a str {
    groups
        .iter()
        .find(|g| g.id == group_id)
        .map_or(group_id, |g| g.name.as_str())
}

fn not_found(kind: &'static str, id: &str) -> BdayError {
    BdayError::NotFound {
        kind,
        id: id.to_string(),
    }
}
