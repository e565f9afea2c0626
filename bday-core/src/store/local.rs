//! Birthdays and groups kept as two JSON entries in a local data directory.
//!
//! Both lists are loaded once when the store is opened and the affected
//! entry is rewritten after every mutation.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{BirthdayStore, seed};
use crate::birthday::Birthday;
use crate::error::{BdayError, BdayResult};
use crate::group::Group;
use crate::snapshot::Snapshot;

const BIRTHDAYS_ENTRY: &str = "birthdays.json";
const GROUPS_ENTRY: &str = "groups.json";

pub struct LocalStore {
    dir: PathBuf,
    birthdays: Vec<Birthday>,
    groups: Vec<Group>,
    last_id: i64,
}

impl LocalStore {
    /// Open the store in `dir`, seeding demo data for missing entries.
    pub fn open(dir: impl Into<PathBuf>) -> BdayResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let birthdays = match read_entry(&dir, BIRTHDAYS_ENTRY)? {
            Some(list) => list,
            None => {
                let list = seed::birthdays();
                write_entry(&dir, BIRTHDAYS_ENTRY, &list)?;
                list
            }
        };
        let groups = match read_entry(&dir, GROUPS_ENTRY)? {
            Some(list) => list,
            None => {
                let list = seed::groups();
                write_entry(&dir, GROUPS_ENTRY, &list)?;
                list
            }
        };

        tracing::debug!(
            dir = %dir.display(),
            birthdays = birthdays.len(),
            groups = groups.len(),
            "opened local store"
        );

        Ok(LocalStore {
            dir,
            birthdays,
            groups,
            last_id: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Millisecond timestamp id, bumped past ids already handed out or stored.
    fn next_id(&mut self) -> String {
        let mut id = Utc::now().timestamp_millis().max(self.last_id + 1);
        while self.id_taken(&id.to_string()) {
            id += 1;
        }
        self.last_id = id;
        id.to_string()
    }

    fn id_taken(&self, id: &str) -> bool {
        self.birthdays.iter().any(|b| b.id == id) || self.groups.iter().any(|g| g.id == id)
    }

    fn save_birthdays(&self) -> BdayResult<()> {
        write_entry(&self.dir, BIRTHDAYS_ENTRY, &self.birthdays)
    }

    fn save_groups(&self) -> BdayResult<()> {
        write_entry(&self.dir, GROUPS_ENTRY, &self.groups)
    }
}

impl BirthdayStore for LocalStore {
    async fn list_birthdays(&self) -> BdayResult<Vec<Birthday>> {
        Ok(self.birthdays.clone())
    }

    async fn add_birthday(&mut self, mut draft: Birthday) -> BdayResult<Birthday> {
        draft.id = self.next_id();
        self.birthdays.push(draft.clone());
        self.save_birthdays()?;
        tracing::debug!(id = %draft.id, "added birthday");
        Ok(draft)
    }

    async fn update_birthday(&mut self, birthday: Birthday) -> BdayResult<Birthday> {
        let slot = self
            .birthdays
            .iter_mut()
            .find(|b| b.id == birthday.id)
            .ok_or_else(|| not_found("Birthday", &birthday.id))?;
        *slot = birthday.clone();
        self.save_birthdays()?;
        tracing::debug!(id = %birthday.id, "updated birthday");
        Ok(birthday)
    }

    async fn delete_birthday(&mut self, id: &str) -> BdayResult<()> {
        let before = self.birthdays.len();
        self.birthdays.retain(|b| b.id != id);
        if self.birthdays.len() == before {
            return Err(not_found("Birthday", id));
        }
        self.save_birthdays()?;
        tracing::debug!(id, "deleted birthday");
        Ok(())
    }

    async fn list_groups(&self) -> BdayResult<Vec<Group>> {
        Ok(self.groups.clone())
    }

    async fn add_group(&mut self, mut draft: Group) -> BdayResult<Group> {
        draft.id = self.next_id();
        self.groups.push(draft.clone());
        self.save_groups()?;
        tracing::debug!(id = %draft.id, "added group");
        Ok(draft)
    }

    async fn update_group(&mut self, group: Group) -> BdayResult<Group> {
        let slot = self
            .groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or_else(|| not_found("Group", &group.id))?;
        *slot = group.clone();
        self.save_groups()?;
        tracing::debug!(id = %group.id, "updated group");
        Ok(group)
    }

    async fn delete_group(&mut self, id: &str) -> BdayResult<()> {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != id);
        if self.groups.len() == before {
            return Err(not_found("Group", id));
        }
        self.save_groups()?;
        tracing::debug!(id, "deleted group");
        Ok(())
    }

    /// Both entries are staged before either replaces its file, so a failed
    /// write leaves the store as it was.
    async fn import(&mut self, snapshot: Snapshot) -> BdayResult<()> {
        let mut staged = Vec::new();
        if let Some(birthdays) = &snapshot.birthdays {
            staged.push(stage_entry(&self.dir, BIRTHDAYS_ENTRY, birthdays)?);
        }
        if let Some(groups) = &snapshot.groups {
            match stage_entry(&self.dir, GROUPS_ENTRY, groups) {
                Ok(entry) => staged.push(entry),
                Err(e) => {
                    discard(&staged);
                    return Err(e);
                }
            }
        }

        for (i, entry) in staged.iter().enumerate() {
            if let Err(e) = entry.commit() {
                discard(&staged[i..]);
                return Err(e);
            }
        }

        if let Some(birthdays) = snapshot.birthdays {
            self.birthdays = birthdays;
        }
        if let Some(groups) = snapshot.groups {
            self.groups = groups;
        }
        tracing::debug!(dir = %self.dir.display(), "imported snapshot");
        Ok(())
    }

    /// Remove both entries. The in-memory lists fall back to the demo data,
    /// which is what the next `open` would load.
    async fn clear(&mut self) -> BdayResult<()> {
        for entry in [BIRTHDAYS_ENTRY, GROUPS_ENTRY] {
            let path = self.dir.join(entry);
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        self.birthdays = seed::birthdays();
        self.groups = seed::groups();
        tracing::debug!(dir = %self.dir.display(), "cleared local store");
        Ok(())
    }
}

fn not_found(kind: &'static str, id: &str) -> BdayError {
    BdayError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn read_entry<T: DeserializeOwned>(dir: &Path, name: &str) -> BdayResult<Option<T>> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let value = serde_json::from_str(&content).map_err(|e| {
        BdayError::Serialization(format!("Could not read {}: {e}", path.display()))
    })?;
    Ok(Some(value))
}

/// An entry written to its temp file, waiting to replace the real one.
struct StagedEntry {
    temp: PathBuf,
    path: PathBuf,
}

impl StagedEntry {
    fn commit(&self) -> BdayResult<()> {
        std::fs::rename(&self.temp, &self.path)?;
        Ok(())
    }
}

fn stage_entry<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> BdayResult<StagedEntry> {
    let content = serde_json::to_string_pretty(value)?;
    let temp = dir.join(format!("{name}.tmp"));
    std::fs::write(&temp, content)?;
    Ok(StagedEntry {
        temp,
        path: dir.join(name),
    })
}

fn discard(staged: &[StagedEntry]) {
    for entry in staged {
        if let Err(e) = std::fs::remove_file(&entry.temp) {
            tracing::warn!(path = %entry.temp.display(), error = %e, "could not remove temp entry");
        }
    }
}

/// Write via a temp file and rename, so a crash never leaves half an entry.
fn write_entry<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> BdayResult<()> {
    stage_entry(dir, name, value)?.commit()
}
