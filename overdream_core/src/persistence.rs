//! Save slots: storage backends and the gateway that moves snapshots
//! between them and the store.

use overdream_rules::Layer;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::snapshot::SaveSlotData;
use crate::state::GameStore;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Save slot '{slot}' could not be (de)serialized: {source}")]
    Serialization {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid save slot key: '{0}'")]
    InvalidSlotKey(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Slot keys are non-empty and limited to ASCII alphanumerics, `-` and `_`.
pub fn validate_slot_key(slot: &str) -> PersistenceResult<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidSlotKey(slot.to_string()))
    }
}

/// Key-value storage for save slots.
pub trait SlotStorage {
    /// Write a slot, replacing any previous contents.
    fn put(&mut self, slot: &str, data: &SaveSlotData) -> PersistenceResult<()>;

    fn get(&self, slot: &str) -> PersistenceResult<Option<SaveSlotData>>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn delete(&mut self, slot: &str) -> PersistenceResult<()>;

    fn entries(&self) -> PersistenceResult<BTreeMap<String, SaveSlotData>>;
}

/// One JSON document per slot under `<root>/<database_name>/`.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    /// Open (creating if needed) the slot directory.
    pub fn open(root: impl AsRef<Path>, database_name: &str) -> PersistenceResult<Self> {
        let dir = root.as_ref().join(database_name);
        fs::create_dir_all(&dir).map_err(|source| PersistenceError::Io {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!("Slot storage opened at: {:?}", dir);
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PersistenceResult<PathBuf> {
        validate_slot_key(slot)?;
        Ok(self.dir.join(format!("{slot}.json")))
    }

    fn read_slot(path: &Path, slot: &str) -> PersistenceResult<Option<SaveSlotData>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Serialization {
                slot: slot.to_string(),
                source,
            })
    }
}

impl SlotStorage for FileSlotStorage {
    fn put(&mut self, slot: &str, data: &SaveSlotData) -> PersistenceResult<()> {
        let path = self.slot_path(slot)?;
        let json =
            serde_json::to_string_pretty(data).map_err(|source| PersistenceError::Serialization {
                slot: slot.to_string(),
                source,
            })?;
        fs::write(&path, json).map_err(|source| PersistenceError::Io { path, source })
    }

    fn get(&self, slot: &str) -> PersistenceResult<Option<SaveSlotData>> {
        let path = self.slot_path(slot)?;
        Self::read_slot(&path, slot)
    }

    fn delete(&mut self, slot: &str) -> PersistenceResult<()> {
        let path = self.slot_path(slot)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Io { path, source }),
        }
    }

    fn entries(&self) -> PersistenceResult<BTreeMap<String, SaveSlotData>> {
        let read_dir = fs::read_dir(&self.dir).map_err(|source| PersistenceError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut entries = BTreeMap::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| PersistenceError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(slot) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if validate_slot_key(slot).is_err() {
                continue;
            }
            // Damaged JSON is logged and skipped; I/O failures propagate.
            match Self::read_slot(&path, slot) {
                Ok(Some(data)) => {
                    entries.insert(slot.to_string(), data);
                }
                Ok(None) => {}
                Err(e @ PersistenceError::Serialization { .. }) => {
                    tracing::warn!("Skipping damaged save slot: {}", e)
                }
                Err(e) => return Err(e),
            }
        }
        Ok(entries)
    }
}

/// In-process slot storage for tests and hosts without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: BTreeMap<String, SaveSlotData>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn put(&mut self, slot: &str, data: &SaveSlotData) -> PersistenceResult<()> {
        validate_slot_key(slot)?;
        self.slots.insert(slot.to_string(), data.clone());
        Ok(())
    }

    fn get(&self, slot: &str) -> PersistenceResult<Option<SaveSlotData>> {
        validate_slot_key(slot)?;
        Ok(self.slots.get(slot).cloned())
    }

    fn delete(&mut self, slot: &str) -> PersistenceResult<()> {
        validate_slot_key(slot)?;
        self.slots.remove(slot);
        Ok(())
    }

    fn entries(&self) -> PersistenceResult<BTreeMap<String, SaveSlotData>> {
        Ok(self.slots.clone())
    }
}

/// Moves snapshots between a [`GameStore`] and slot storage.
#[derive(Debug)]
pub struct SaveGateway<S: SlotStorage> {
    storage: S,
}

impl<S: SlotStorage> SaveGateway<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Snapshot the store into `slot`, overwriting it.
    pub fn save(&mut self, store: &GameStore, slot: &str) -> PersistenceResult<SaveSlotData> {
        let data = SaveSlotData::capture_now(store.state());
        self.storage.put(slot, &data)?;
        tracing::info!(slot, timestamp = data.timestamp, "Game saved");
        Ok(data)
    }

    /// Read `slot` and hydrate the store from it. A missing slot leaves the
    /// store untouched and returns `Ok(None)`.
    pub fn load(
        &self,
        store: &mut GameStore,
        slot: &str,
    ) -> PersistenceResult<Option<SaveSlotData>> {
        let Some(data) = self.fetch(slot)? else {
            return Ok(None);
        };
        store.mutate(|s| s.hydrate(&data.state));
        tracing::info!(slot, timestamp = data.timestamp, "Game loaded");
        Ok(Some(data))
    }

    /// Menu "load": hydrate from `slot`, drop into the waking layer and hide
    /// the menu, all in one notification. Returns whether the slot existed.
    pub fn load_game(&self, store: &mut GameStore, slot: &str) -> PersistenceResult<bool> {
        let Some(data) = self.fetch(slot)? else {
            return Ok(false);
        };
        store.mutate(|s| {
            s.hydrate(&data.state);
            s.set_layer(Layer::Waking);
            s.menu_visible = false;
        });
        tracing::info!(slot, timestamp = data.timestamp, "Game loaded");
        Ok(true)
    }

    fn fetch(&self, slot: &str) -> PersistenceResult<Option<SaveSlotData>> {
        let data = self.storage.get(slot)?;
        if data.is_none() {
            tracing::debug!(slot, "No save in slot");
        }
        Ok(data)
    }

    pub fn clear(&mut self, slot: &str) -> PersistenceResult<()> {
        self.storage.delete(slot)?;
        tracing::info!(slot, "Save slot cleared");
        Ok(())
    }

    pub fn list(&self) -> PersistenceResult<BTreeMap<String, SaveSlotData>> {
        self.storage.entries()
    }
}
