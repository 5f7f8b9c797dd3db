//! Device-keyed mount tables.
use std::collections::HashMap;

/// A single mount, either declared in fstab or reported by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
}

impl MountEntry {
    pub fn new(
        device: impl Into<String>,
        mount_point: impl Into<String>,
        fs_type: impl Into<String>,
    ) -> Self {
        Self {
            device: device.into(),
            mount_point: mount_point.into(),
            fs_type: fs_type.into(),
        }
    }
}

/// An insertion-ordered map from device to [`MountEntry`].
///
/// Inserting a device that is already present replaces its entry but keeps the position at
/// which the device was first seen, so iteration order stays stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountTable {
    entries: Vec<MountEntry>,
    index: HashMap<String, usize>,
}

impl MountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the entry it replaced, if any.
    pub fn insert(&mut self, entry: MountEntry) -> Option<MountEntry> {
        match self.index.get(&entry.device) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos], entry)),
            None => {
                self.index.insert(entry.device.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, device: &str) -> Option<&MountEntry> {
        self.index.get(device).map(|&pos| &self.entries[pos])
    }

    pub fn contains_device(&self, device: &str) -> bool {
        self.index.contains_key(device)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MountEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<MountEntry> for MountTable {
    fn from_iter<I: IntoIterator<Item = MountEntry>>(iter: I) -> Self {
        let mut table = MountTable::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl<'a> IntoIterator for &'a MountTable {
    type Item = &'a MountEntry;
    type IntoIter = std::slice::Iter<'a, MountEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
