//! The persistent key-value store every manager works against.
//!
//! Keys map to arbitrary JSON values; an absent key always reads as its
//! type's empty default, never as an error. [`FileStore`] keeps the whole
//! map in one JSON document on disk, rewritten on every mutation — the
//! single-user, synchronous analogue of the browser storage the original
//! app ran on. [`MemoryStore`] backs the tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::Result;

pub mod keys {
    pub const INVOICES: &str = "invoices";
    pub const PRODUCTS: &str = "products";
    pub const CUSTOMERS: &str = "customers";
    pub const SELLER: &str = "seller";
    pub const BANK_ACCOUNTS: &str = "bankAccounts";
    pub const INVOICE_HEADER: &str = "invoiceHeader";
    pub const INVOICE_FOOTER: &str = "invoiceFooter";
}

pub trait Store {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Reads and decodes a key, falling back to `T::default()` when the key
    /// is absent or its value does not decode.
    fn get_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
        Self: Sized,
    {
        self.get(key)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        self.set(key, serde_json::to_value(value)?)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileStore {
    /// Opens (or creates) the store document at `path`. A missing file is an
    /// empty store; a file that fails to parse is a real error rather than
    /// silent data loss.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(FileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
