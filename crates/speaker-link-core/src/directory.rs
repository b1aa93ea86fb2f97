//! Last-known device directory.
//!
//! The snapshot is always replaced wholesale; there is no per-field patching.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::model::{Device, GroupSummary};

/// Holds the most recent directory snapshot keyed by device name.
#[derive(Debug, Default, Clone)]
pub struct DirectoryStore {
    devices: IndexMap<String, Device>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the whole snapshot.
    ///
    /// When a name appears more than once, the last record wins and keeps the
    /// position of the first occurrence.
    pub fn replace<I>(&mut self, devices: I)
    where
        I: IntoIterator<Item = Device>,
    {
        let mut next = IndexMap::new();
        for device in devices {
            next.insert(device.name.clone(), device);
        }
        self.devices = next;
        self.refreshed_at = Some(Utc::now());
    }

    /// All devices in the order of the last `replace`.
    pub fn all(&self) -> Vec<Device> {
        self.devices.values().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Device> {
        self.devices.get(name)
    }

    pub fn names(&self) -> HashSet<String> {
        self.devices.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// When the current snapshot was applied, `None` before the first fetch.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Groups derived from each device's `groupName`, sorted by group name.
    pub fn groups(&self) -> Vec<GroupSummary> {
        let mut groups: IndexMap<&str, Vec<String>> = IndexMap::new();
        for device in self.devices.values() {
            if let Some(group) = device.group() {
                groups.entry(group).or_default().push(device.name.clone());
            }
        }

        let mut summaries: Vec<GroupSummary> = groups
            .into_iter()
            .map(|(name, members)| GroupSummary {
                name: name.to_string(),
                members,
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(store: &DirectoryStore) -> Vec<String> {
        store.all().into_iter().map(|d| d.name).collect()
    }

    #[test]
    fn test_replace_discards_previous_snapshot() {
        let mut store = DirectoryStore::new();
        store.replace(vec![
            Device::new("Kitchen", "10.0.0.1"),
            Device::new("Den", "10.0.0.2"),
        ]);
        store.replace(vec![Device::new("Patio", "10.0.0.3")]);

        assert_eq!(names(&store), vec!["Patio"]);
        assert!(store.get("Kitchen").is_none());
    }

    #[test]
    fn test_replace_sequence_reflects_only_last_input() {
        let mut store = DirectoryStore::new();
        let rounds = [
            vec!["a", "b", "c"],
            vec![],
            vec!["c", "d"],
            vec!["e", "a", "b"],
        ];
        for round in &rounds {
            store.replace(round.iter().map(|n| Device::new(*n, "10.0.0.1")));
            assert_eq!(names(&store), *round);
        }
    }

    #[test]
    fn test_duplicate_name_last_record_wins() {
        let mut store = DirectoryStore::new();
        store.replace(vec![
            Device::new("Kitchen", "10.0.0.1"),
            Device::new("Den", "10.0.0.2"),
            Device::new("Kitchen", "10.0.0.9"),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(names(&store), vec!["Kitchen", "Den"]);
        assert_eq!(store.get("Kitchen").unwrap().ip, "10.0.0.9");
    }

    #[test]
    fn test_empty_store() {
        let mut store = DirectoryStore::new();
        assert!(store.is_empty());
        assert!(store.refreshed_at().is_none());

        store.replace(Vec::new());
        assert!(store.is_empty());
        assert!(store.refreshed_at().is_some());
    }

    #[test]
    fn test_groups_derived_from_members() {
        let mut store = DirectoryStore::new();
        store.replace(vec![
            Device::new("Kitchen", "10.0.0.1").with_group("Upstairs"),
            Device::new("Den", "10.0.0.2").with_group("Downstairs"),
            Device::new("Patio", "10.0.0.3"),
            Device::new("Bath", "10.0.0.4").with_group("Upstairs"),
        ]);

        let groups = store.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Downstairs");
        assert_eq!(groups[0].members, vec!["Den"]);
        assert_eq!(groups[1].name, "Upstairs");
        assert_eq!(groups[1].members, vec!["Kitchen", "Bath"]);
    }
}
