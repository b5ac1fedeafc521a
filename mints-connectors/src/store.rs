//! Latest-reading climate store

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use log::{debug, warn};
use mints_schemas::ClimateReading;

use crate::StoreError;

/// Keeps the most recent climate reading per `(node, sensor)`
pub trait ClimateStore {
    /// Latest reading, or `None` if there is none usable
    fn load(&self, node_id: &str, sensor_id: &str) -> Result<Option<ClimateReading>, StoreError>;

    /// Replace the latest reading
    fn save(&self, node_id: &str, sensor_id: &str, reading: &ClimateReading) -> Result<(), StoreError>;
}

/// Keys become path components, so they must be plain names
fn check_key(key: &str) -> Result<&str, StoreError> {
    let plain = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0']);
    if plain {
        Ok(key)
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// One JSON file per reading under a root directory
#[derive(Debug)]
pub struct FileClimateStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl FileClimateStore {
    /// Store rooted at `root`; directories are created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock: Mutex::new(()),
        }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the reading for a key
    pub fn path_for(&self, node_id: &str, sensor_id: &str) -> Result<PathBuf, StoreError> {
        Ok(self
            .root
            .join(check_key(node_id)?)
            .join(format!("{}.json", check_key(sensor_id)?)))
    }
}

impl ClimateStore for FileClimateStore {
    fn load(&self, node_id: &str, sensor_id: &str) -> Result<Option<ClimateReading>, StoreError> {
        let path = self.path_for(node_id, sensor_id)?;
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&text) {
            Ok(reading) => Ok(Some(reading)),
            Err(e) => {
                warn!("Ignoring unreadable climate reading {}: {e}", path.display());
                Ok(None)
            }
        }
    }

    fn save(&self, node_id: &str, sensor_id: &str, reading: &ClimateReading) -> Result<(), StoreError> {
        let path = self.path_for(node_id, sensor_id)?;
        let encoded = serde_json::to_vec(reading)?;
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let staging = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&staging)?;
            file.write_all(&encoded)?;
            file.sync_all()?;
        }
        fs::rename(&staging, &path)?;

        debug!("Stored climate reading at {}", path.display());
        Ok(())
    }
}

/// In-process store for tests and replay
#[derive(Debug, Default)]
pub struct MemoryClimateStore {
    readings: Mutex<HashMap<(String, String), ClimateReading>>,
}

impl MemoryClimateStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClimateStore for MemoryClimateStore {
    fn load(&self, node_id: &str, sensor_id: &str) -> Result<Option<ClimateReading>, StoreError> {
        let readings = self.readings.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(readings
            .get(&(node_id.to_string(), sensor_id.to_string()))
            .cloned())
    }

    fn save(&self, node_id: &str, sensor_id: &str, reading: &ClimateReading) -> Result<(), StoreError> {
        check_key(node_id)?;
        check_key(sensor_id)?;
        let mut readings = self.readings.lock().map_err(|_| StoreError::Poisoned)?;
        readings.insert((node_id.to_string(), sensor_id.to_string()), reading.clone());
        Ok(())
    }
}
