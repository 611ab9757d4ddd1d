//! JSON file persistence for the object store

use super::Storage;
use crate::core::{HbnbError, Result};
use crate::models::{ClassName, Record, storage_key};
use serde_json::Map;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub const DEFAULT_FILE_PATH: &str = "file.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Constructed, nothing loaded yet
    Empty,
    /// `reload()` has run at least once
    Populated,
}

/// All live records, keyed `ClassName.id`, mirrored to one JSON file.
pub struct FileStorage {
    path: PathBuf,
    objects: HashMap<String, Record>,
    state: StoreState,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            objects: HashMap::new(),
            state: StoreState::Empty,
        }
    }

    /// Construct and immediately load whatever the file holds.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut storage = Self::new(path);
        storage.reload()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    fn temp_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn decode(raw: &str) -> Result<HashMap<String, Record>> {
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let documents: Map<String, serde_json::Value> = serde_json::from_str(raw)?;
        let mut objects = HashMap::with_capacity(documents.len());

        for (key, document) in documents {
            let serde_json::Value::Object(fields) = document else {
                return Err(HbnbError::CorruptRecord(format!(
                    "entry '{}' is not an object",
                    key
                )));
            };
            let record = Record::from_document(fields)?;
            let actual_key = record.key();
            if actual_key != key {
                warn!("Stored key '{}' does not match record, rekeying as '{}'", key, actual_key);
            }
            objects.insert(actual_key, record);
        }

        Ok(objects)
    }
}

impl Storage for FileStorage {
    fn add(&mut self, record: Record) {
        self.objects.insert(record.key(), record);
    }

    /// Ordered by creation time, then key.
    fn all(&self, class: Option<ClassName>) -> Vec<&Record> {
        let mut records: Vec<&Record> = self
            .objects
            .values()
            .filter(|record| class.is_none_or(|c| record.class() == c))
            .collect();
        records.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.key().cmp(&b.key()))
        });
        records
    }

    fn get(&self, class: ClassName, id: &str) -> Option<&Record> {
        self.objects.get(&storage_key(class, id))
    }

    fn get_mut(&mut self, class: ClassName, id: &str) -> Option<&mut Record> {
        self.objects.get_mut(&storage_key(class, id))
    }

    fn delete(&mut self, key: &str) -> Option<Record> {
        self.objects.remove(key)
    }

    fn save(&self) -> Result<()> {
        let mut documents = BTreeMap::new();
        for (key, record) in &self.objects {
            documents.insert(key.as_str(), record.to_document()?);
        }

        // Whole-file replacement: write beside the target, then rename over it.
        let temp = NamedTempFile::new_in(self.temp_dir())?;
        let mut writer = BufWriter::new(temp);
        serde_json::to_writer(&mut writer, &documents)?;
        writer.flush()?;
        let temp = writer.into_inner().map_err(|e| HbnbError::Io(e.error().to_string()))?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;

        debug!("Saved {} records to {}", self.objects.len(), self.path.display());
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let objects = if self.path.exists() {
            let raw = fs::read_to_string(&self.path)?;
            Self::decode(&raw)?
        } else {
            debug!("{} not found, starting empty", self.path.display());
            HashMap::new()
        };

        info!("Loaded {} records from {}", objects.len(), self.path.display());
        self.objects = objects;
        self.state = StoreState::Populated;
        Ok(())
    }
}
