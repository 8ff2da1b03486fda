use crate::arg::*;
use crate::catalog::*;
use crate::decoding::*;
use crate::collection::*;

use thiserror::Error;

use std::fs;
use std::io;
use std::sync::*;
use std::collections::{HashMap};
use std::path::{PathBuf};

///
/// A durable store that holds string values under string keys
///
pub trait KeyValueStore {
    ///
    /// Reads the value stored under a key, or `None` if nothing has been stored there
    ///
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    ///
    /// Replaces the value stored under a key
    ///
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

///
/// Error from loading or saving paths
///
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be read or written
    #[error("storage could not be accessed: {0}")]
    Io(#[from] io::Error),

    /// The stored data is not a JSON array of path encodings
    #[error("stored paths are malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// One of the stored paths could not be decoded
    #[error(transparent)]
    Decode(#[from] CollectionDecodeError),

    /// The key cannot be used with this store
    #[error("'{0}' cannot be used as a storage key")]
    InvalidKey(String)
}

///
/// A key-value store that only lives in memory
///
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>
}

///
/// A key-value store that keeps each value in a `<key>.json` file in a directory
///
#[derive(Clone, Debug)]
pub struct FileStore {
    directory: PathBuf
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl FileStore {
    ///
    /// Creates a store that keeps its values in the specified directory (which is created when a value is first written)
    ///
    pub fn new<TPath: Into<PathBuf>>(directory: TPath) -> FileStore {
        FileStore {
            directory: directory.into()
        }
    }

    ///
    /// The file that a key is stored in
    ///
    fn file_for_key(&self, key: &str) -> Result<PathBuf, StorageError> {
        let is_valid = !key.is_empty()
            && key.chars().all(|chr| chr.is_ascii_alphanumeric() || chr == '_' || chr == '-');

        if is_valid {
            Ok(self.directory.join(format!("{}.json", key)))
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.file_for_key(key)?) {
            Ok(value)                                       => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound  => Ok(None),
            Err(err)                                        => Err(err.into())
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let file = self.file_for_key(key)?;

        fs::create_dir_all(&self.directory)?;
        fs::write(file, value)?;

        Ok(())
    }
}

impl PathCollection {
    ///
    /// Reads a collection from the JSON produced by `to_json()`
    ///
    pub fn from_json(catalog: Arc<InstructionCatalog>, json: &str, mode: DecodeMode) -> Result<PathCollection, StorageError> {
        let data: Vec<Vec<ArgValue>> = serde_json::from_str(json)?;
        Ok(PathCollection::decode(catalog, &data, mode)?)
    }
}

///
/// Loads the paths stored under a key
///
/// If nothing has been stored yet, the result is a collection with a single empty path. If the stored
/// data can't be decoded, the error is returned and nothing is loaded.
///
pub fn load_paths<TStore>(store: &TStore, key: &str, catalog: Arc<InstructionCatalog>) -> Result<PathCollection, StorageError>
where
    TStore: KeyValueStore + ?Sized,
{
    match store.read(key)? {
        None        => {
            debug!("Nothing stored under '{}': starting with an empty path", key);
            Ok(PathCollection::with_empty_path(catalog))
        }

        Some(json)  => {
            PathCollection::from_json(catalog, &json, DecodeMode::Repair)
                .map_err(|err| {
                    warn!("Could not load paths from '{}': {}", key, err);
                    err
                })
        }
    }
}

///
/// Stores the paths in a collection under a key (paths that are flagged for deletion are not saved)
///
pub fn save_paths<TStore>(store: &mut TStore, key: &str, collection: &PathCollection) -> Result<(), StorageError>
where
    TStore: KeyValueStore + ?Sized,
{
    let json = collection.to_json()?;
    store.write(key, &json)
}
