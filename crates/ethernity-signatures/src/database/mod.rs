//! Signature database adapters.
//!
//! Every store maps the lower-case hex of a raw selector (no `0x`) to a
//! canonical signature. Four-byte function keys and 32-byte event keys live
//! in separate stores.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use ethernity_core::utils::{event_topic, function_selector, normalize_selector_key};
use ethernity_core::{Error, Result, SelectorKind, SignatureStore};
use once_cell::sync::OnceCell;
use tracing::debug;

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `{ "<hex>": "<signature>" }` JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| Error::DatabaseUnavailable(format!("invalid signature json: {e}")))?;
        Ok(raw.into_iter().collect())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_reader(reader)
            .map_err(|e| Error::DatabaseUnavailable(format!("invalid signature json: {e}")))?;
        Ok(raw.into_iter().collect())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::DatabaseUnavailable(format!("{}: {e}", path.display())))?;
        let store = Self::from_reader(BufReader::new(file))?;
        debug!("loaded {} signatures from {}", store.len(), path.display());
        Ok(store)
    }

    /// Builds a store by hashing canonical signatures.
    pub fn from_signatures<I, S>(kind: SelectorKind, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        for sig in signatures {
            store.insert_signature(kind, sig.as_ref());
        }
        store
    }

    /// Inserts under an explicit key; the key is normalized first.
    pub fn insert(&mut self, key: &str, signature: impl Into<String>) -> Option<String> {
        self.entries.insert(normalize_selector_key(key), signature.into())
    }

    /// Inserts `signature` under its own keccak-derived key.
    pub fn insert_signature(&mut self, kind: SelectorKind, signature: &str) -> Option<String> {
        let key = match kind {
            SelectorKind::Function => hex::encode(function_selector(signature)),
            SelectorKind::Event => hex::encode(event_topic(signature)),
        };
        self.entries.insert(key, signature.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut store = Self::new();
        for (key, sig) in iter {
            store.insert(key.as_ref(), sig);
        }
        store
    }
}

impl SignatureStore for MemoryStore {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(&normalize_selector_key(key)).cloned())
    }
}

/// JSON file store, loaded on first use or eagerly through [`JsonFileStore::open`].
///
/// A missing or malformed file makes every lookup fail with
/// [`Error::DatabaseUnavailable`]; loading is retried on the next lookup.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    loaded: OnceCell<MemoryStore>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), loaded: OnceCell::new() }
    }

    /// Loads the file immediately; a missing or malformed file is an error here.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.store()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    fn store(&self) -> Result<&MemoryStore> {
        self.loaded.get_or_try_init(|| MemoryStore::from_json_file(&self.path))
    }
}

impl SignatureStore for JsonFileStore {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        self.store()?.lookup(key)
    }

    fn check_available(&self) -> Result<()> {
        self.store().map(|_| ())
    }
}

/// Looks up a function signature by raw id; only the first 4 bytes are used.
pub fn lookup_function_signature(store: &dyn SignatureStore, id: &[u8]) -> Result<Option<String>> {
    lookup_by_id(store, SelectorKind::Function, id)
}

/// Looks up an event signature by raw id; only the first 32 bytes are used.
pub fn lookup_event_signature(store: &dyn SignatureStore, id: &[u8]) -> Result<Option<String>> {
    lookup_by_id(store, SelectorKind::Event, id)
}

fn lookup_by_id(store: &dyn SignatureStore, kind: SelectorKind, id: &[u8]) -> Result<Option<String>> {
    let len = kind.byte_len();
    if id.len() < len {
        return Err(Error::InvalidSelectorLength { expected: len, got: id.len() });
    }
    store.lookup(&hex::encode(&id[..len]))
}
