//! Process-wide registry of per-kind method tables.
//!
//! Every ring kind gets exactly one [`Methods`] table, built the first time a
//! context of that kind is constructed and reused afterwards. Matrix rings
//! of every shape and base ring share one table; what distinguishes them is
//! the context's auxiliary data, never the table.
//!
//! Construction is guarded: concurrent first use from several threads builds
//! the table once.
//!
//! # Example
//!
//! ```
//! use generic_rings::{GrCtx, MethodRegistry, rings::Nmod};
//!
//! let registry = MethodRegistry::new();
//! assert!(!registry.contains::<Nmod>());
//!
//! let _a = GrCtx::with_registry(Nmod::new(3).unwrap(), &registry);
//! let _b = GrCtx::with_registry(Nmod::new(5).unwrap(), &registry);
//! assert!(registry.contains::<Nmod>());
//! assert_eq!(registry.len(), 1);
//! ```

use core::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use super::dispatch::Dispatch;
use super::{Methods, Ring};

/// Registry of method tables keyed by ring kind.
pub struct MethodRegistry {
    tables: RwLock<HashMap<TypeId, &'static dyn Methods>>,
}

impl MethodRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// The registry used by [`GrCtx::new`](super::GrCtx::new).
    pub fn global() -> &'static MethodRegistry {
        static GLOBAL: OnceLock<MethodRegistry> = OnceLock::new();
        GLOBAL.get_or_init(MethodRegistry::new)
    }

    /// Returns the table for kind `R`, building it on first use.
    pub fn methods_for<R: Ring>(&self) -> &'static dyn Methods {
        let key = TypeId::of::<R>();
        if let Some(table) = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return *table;
        }

        // Re-checked under the write lock: another thread may have won.
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        *tables.entry(key).or_insert_with(|| {
            tracing::debug!(kind = core::any::type_name::<R>(), "building method table");
            let table: &'static Dispatch<R> = Box::leak(Box::new(Dispatch::<R>::new()));
            table
        })
    }

    /// Returns true if the table for kind `R` has been built.
    #[must_use]
    pub fn contains<R: Ring>(&self) -> bool {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<R>())
    }

    /// Number of kinds with a built table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no table has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_list()
            .entries(tables.values().map(|t| t.kind_name()))
            .finish()
    }
}
