use super::backend::StorageBackend;
use crate::error::{Result, VitaeError};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since vitae is single-threaded.
/// This allows the `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, Value>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to seed a raw value, bypassing `save`.
    pub fn insert_raw(&self, key: &str, value: Value) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }
}

impl StorageBackend for MemBackend {
    fn load(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(VitaeError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
