//! Standard Registry
//!
//! Named lookup of loaded standards. Entries are immutable once registered
//! and handed out as `Arc`s, so any number of threads can compute against
//! the same standard while others register new ones.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::builtin::Builtin;
use crate::definition::Standard;
use crate::StandardError;

/// Thread-safe registry of standards keyed by name
pub struct StandardRegistry {
    standards: RwLock<HashMap<String, Arc<Standard>>>,
}

impl StandardRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            standards: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding every built-in standard
    pub fn with_defaults() -> Result<Self, StandardError> {
        let registry = Self::new();
        registry.load_defaults()?;
        Ok(registry)
    }

    /// Register a standard under its own name
    ///
    /// A name can be registered once; replacing a table under a live name
    /// would change results for callers already holding it.
    pub fn register(&self, standard: Standard) -> Result<Arc<Standard>, StandardError> {
        let name = standard.name().to_ascii_lowercase();
        let mut standards = self.standards.write().map_err(|_| StandardError::Poisoned)?;

        if standards.contains_key(&name) {
            return Err(StandardError::Duplicate(name));
        }

        log::info!(
            "Registered standard '{}' ({} pollutants)",
            name,
            standard.engine().table().pollutants().count()
        );
        let standard = Arc::new(standard);
        standards.insert(name, Arc::clone(&standard));
        Ok(standard)
    }

    /// Load a JSON definition from disk and register it
    pub fn register_path(&self, path: &Path) -> Result<Arc<Standard>, StandardError> {
        self.register(Standard::from_path(path)?)
    }

    /// Get a standard by name (case-insensitive)
    pub fn get(&self, name: &str) -> Result<Arc<Standard>, StandardError> {
        let standards = self.standards.read().map_err(|_| StandardError::Poisoned)?;

        standards
            .get(&name.trim().to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| StandardError::NotFound(name.to_string()))
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Result<Vec<String>, StandardError> {
        let standards = self.standards.read().map_err(|_| StandardError::Poisoned)?;
        let mut names: Vec<String> = standards.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Register the built-in standards not already present
    pub fn load_defaults(&self) -> Result<(), StandardError> {
        for builtin in Builtin::ALL {
            if self.contains(builtin.id()) {
                continue;
            }
            self.register(builtin.load()?)?;
        }
        Ok(())
    }
}

impl Default for StandardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// Process-wide registry with the built-in standards loaded
    pub static ref GLOBAL_REGISTRY: StandardRegistry = {
        let registry = StandardRegistry::new();
        if let Err(e) = registry.load_defaults() {
            log::error!("Failed to load built-in standards: {}", e);
        }
        registry
    };
}
