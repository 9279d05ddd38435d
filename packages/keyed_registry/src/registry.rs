use std::any::{Any, type_name};
use std::fmt;
use std::sync::{Arc, Mutex};

use foldhash::{HashMap, HashMapExt};

use crate::constants::ERR_POISONED_LOCK;
use crate::{Handle, RegistryError, type_label};

/// A thread-safe registry of heterogeneous objects keyed by string identifiers.
///
/// The registry owns every stored entry. Callers retrieve shared, reference-counted views
/// whose lifetime may outlive the entry; destroying an entry releases the registry's share
/// while outstanding views keep the object alive.
///
/// This type acts as a cheaply cloneable handle to a shared registry instance. It is a plain
/// value the caller constructs and passes around; it is not a process-wide singleton.
///
/// # Identity semantics
///
/// At most one entry exists per identifier. Creating under an identifier that is already
/// taken silently replaces the prior entry; destroying an identifier that does not exist is
/// a silent no-op. There is no update-in-place operation, replacement is always via
/// [`create()`][Self::create].
///
/// # Thread safety
///
/// Every operation takes a single mutual-exclusion lock around the shared state, so the
/// registry can be used freely from multiple threads. Between concurrent `create` and
/// `destroy` calls on the same identifier, the last writer under the lock wins; no further
/// ordering is guaranteed. For single-threaded use, [`LocalRegistry`][crate::LocalRegistry]
/// avoids the locking overhead.
///
/// # Example
///
/// ```rust
/// use std::thread;
///
/// use keyed_registry::Registry;
///
/// let registry = Registry::new();
///
/// // Clone the registry handle to share across threads.
/// let registry_clone = registry.clone();
///
/// let worker = thread::spawn(move || {
///     registry_clone.create("answer", 42_u64);
/// });
/// worker.join().unwrap();
///
/// assert_eq!(*registry.get::<u64>("answer"), 42);
/// ```
#[derive(Clone)]
pub struct Registry {
    /// The shared registry state protected by a mutex for thread safety.
    inner: Arc<Mutex<HashMap<String, Entry>>>,
}

/// One stored entry: the type-erased instance plus the concrete type identity captured at
/// creation, used to report mismatches by name.
struct Entry {
    instance: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Registry {
    /// Creates a new empty registry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::Registry;
    ///
    /// let registry = Registry::new();
    /// assert!(registry.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Stores `value` under `id`, silently replacing any prior entry at that identifier.
    ///
    /// The registry releases its ownership share of a replaced entry; shared views of the old
    /// instance held elsewhere keep that object alive until they are dropped.
    ///
    /// Returns the identifier for convenience.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::Registry;
    ///
    /// let registry = Registry::new();
    ///
    /// registry.create("slot", "first".to_string());
    /// registry.create("slot", "second".to_string());
    ///
    /// // Replacement, not accumulation.
    /// assert_eq!(registry.len(), 1);
    /// assert_eq!(*registry.get::<String>("slot"), "second");
    /// ```
    pub fn create<T: Any + Send + Sync>(&self, id: impl Into<String>, value: T) -> String {
        let id = id.into();
        let entry = Entry {
            instance: Arc::new(value),
            type_name: type_name::<T>(),
        };

        self.inner
            .lock()
            .expect(ERR_POISONED_LOCK)
            .insert(id.clone(), entry);
        id
    }

    /// Stores `value` under the per-type label of `T` (see [`type_label()`][type_label]).
    ///
    /// Because the identifier is derived from the type, at most one auto-named instance of
    /// any concrete type exists at a time; calling this twice for the same type replaces the
    /// first instance. This is the documented mechanism for "one instance per type".
    ///
    /// Returns the derived identifier.
    pub fn create_auto<T: Any + Send + Sync>(&self, value: T) -> String {
        self.create(type_label::<T>(), value)
    }

    /// Looks up `id` and returns a typed handle.
    ///
    /// The handle is unsuccessful when no entry exists at `id` or when the entry's concrete
    /// type is not `T`. Use [`try_get()`][Self::try_get] to distinguish the two conditions.
    /// Lookup is non-destructive and may be repeated arbitrarily.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::Registry;
    ///
    /// let registry = Registry::new();
    /// registry.create("answer", 42_u64);
    ///
    /// assert!(registry.get::<u64>("answer").succeeded());
    /// assert!(!registry.get::<String>("answer").succeeded());
    /// assert!(!registry.get::<u64>("nonexistent").succeeded());
    /// ```
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, id: &str) -> Handle<T> {
        Handle::new(self.try_get(id).ok())
    }

    /// Looks up the auto-named entry for `T`, equivalent to `get::<T>(type_label::<T>())`.
    #[must_use]
    pub fn get_auto<T: Any + Send + Sync>(&self) -> Handle<T> {
        self.get(type_label::<T>())
    }

    /// Looks up `id` and returns the shared view, distinguishing the two failure conditions.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no entry exists at `id`, and
    /// [`RegistryError::TypeMismatch`] when an entry exists but its concrete type is not `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::{Registry, RegistryError};
    ///
    /// let registry = Registry::new();
    /// registry.create("answer", 42_u64);
    ///
    /// assert_eq!(*registry.try_get::<u64>("answer").unwrap(), 42);
    ///
    /// assert!(matches!(
    ///     registry.try_get::<String>("answer"),
    ///     Err(RegistryError::TypeMismatch { .. })
    /// ));
    /// ```
    pub fn try_get<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, RegistryError> {
        let map = self.inner.lock().expect(ERR_POISONED_LOCK);

        let entry = map.get(id).ok_or_else(|| RegistryError::NotFound {
            identifier: id.to_string(),
        })?;

        Arc::clone(&entry.instance)
            .downcast::<T>()
            .map_err(|_instance| RegistryError::TypeMismatch {
                identifier: id.to_string(),
                stored: entry.type_name,
                requested: type_name::<T>(),
            })
    }

    /// Looks up the auto-named entry for `T`, equivalent to
    /// `try_get::<T>(type_label::<T>())`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no auto-named entry for `T` exists, and
    /// [`RegistryError::TypeMismatch`] when the entry at that label stores a different type.
    pub fn try_get_auto<T: Any + Send + Sync>(&self) -> Result<Arc<T>, RegistryError> {
        self.try_get(type_label::<T>())
    }

    /// Removes the entry at `id` if present; silently does nothing otherwise.
    ///
    /// Outstanding shared views of the removed instance stay valid; only the registry's
    /// ownership share is released.
    pub fn destroy(&self, id: &str) {
        self.inner.lock().expect(ERR_POISONED_LOCK).remove(id);
    }

    /// Removes the auto-named entry for `T`, equivalent to `destroy(type_label::<T>())`.
    pub fn destroy_auto<T: Any + Send + Sync>(&self) {
        self.destroy(type_label::<T>());
    }

    /// Removes every entry in one bulk clear.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::Registry;
    ///
    /// let registry = Registry::new();
    /// registry.create("a", 1_u32);
    /// registry.create("b", 2_u32);
    ///
    /// registry.destroy_all();
    /// assert!(registry.is_empty());
    /// ```
    pub fn destroy_all(&self) {
        self.inner.lock().expect(ERR_POISONED_LOCK).clear();
    }

    /// Returns whether an entry exists at `id`, regardless of its concrete type.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.lock().expect(ERR_POISONED_LOCK).contains_key(id)
    }

    /// Returns the number of entries currently stored.
    ///
    /// This operation may block if another thread is currently accessing the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Returns whether the registry has no entries.
    ///
    /// This operation may block if another thread is currently accessing the registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().expect(ERR_POISONED_LOCK).is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
