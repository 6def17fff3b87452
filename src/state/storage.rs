//! Origin-scoped key-value storage backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store never touches `localStorage` directly; it goes through
//! `KeyValueStore` so tests can swap in `MemoryStore`.
//!
//! TRADE-OFFS
//! ==========
//! Browser storage access is best-effort: quota or privacy-mode failures are
//! logged and treated as a missing value rather than surfaced to callers.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// String-keyed durable storage.
///
/// Removing an absent key must be a no-op.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-memory store shared between clones.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// `window.localStorage`. Inert outside the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match window.local_storage() {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("localStorage unavailable: {err:?}");
            None
        }
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            match local_storage()?.get_item(key) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("localStorage read failed for {key}: {err:?}");
                    None
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if let Err(err) = storage.set_item(key, value) {
                    log::warn!("localStorage write failed for {key}: {err:?}");
                }
            }
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if let Err(err) = storage.remove_item(key) {
                    log::warn!("localStorage remove failed for {key}: {err:?}");
                }
            }
        }
    }
}
