use std::any::{Any, type_name};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use foldhash::{HashMap, HashMapExt};

use crate::{LocalHandle, RegistryError, type_label};

/// A single-threaded registry of heterogeneous objects keyed by string identifiers.
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
/// # Single-threaded design
///
/// This type is designed for single-threaded use and is neither [`Send`] nor [`Sync`].
/// For multi-threaded scenarios, use [`Registry`][crate::Registry] instead.
///
/// # Example
///
/// ```rust
/// use keyed_registry::LocalRegistry;
///
/// let registry = LocalRegistry::new();
///
/// registry.create("answer", 42_u64);
/// registry.create("greeting", "hello".to_string());
///
/// assert_eq!(*registry.get::<u64>("answer"), 42);
/// assert_eq!(*registry.get::<String>("greeting"), "hello");
/// ```
#[derive(Clone)]
pub struct LocalRegistry {
    /// The shared registry state protected by a `RefCell` for single-threaded interior
    /// mutability.
    inner: Rc<RefCell<HashMap<String, LocalEntry>>>,
}

/// One stored entry: the type-erased instance plus the concrete type identity captured at
/// creation, used to report mismatches by name.
struct LocalEntry {
    instance: Rc<dyn Any>,
    type_name: &'static str,
}

impl LocalRegistry {
    /// Creates a new empty registry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    /// assert!(registry.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HashMap::new())),
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
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    ///
    /// registry.create("slot", "first".to_string());
    /// registry.create("slot", "second".to_string());
    ///
    /// // Replacement, not accumulation.
    /// assert_eq!(registry.len(), 1);
    /// assert_eq!(*registry.get::<String>("slot"), "second");
    /// ```
    pub fn create<T: Any>(&self, id: impl Into<String>, value: T) -> String {
        let id = id.into();
        let entry = LocalEntry {
            instance: Rc::new(value),
            type_name: type_name::<T>(),
        };

        self.inner.borrow_mut().insert(id.clone(), entry);
        id
    }

    /// Stores `value` under the per-type label of `T` (see [`type_label()`][type_label]).
    ///
    /// Because the identifier is derived from the type, at most one auto-named instance of
    /// any concrete type exists at a time; calling this twice for the same type replaces the
    /// first instance. This is the documented mechanism for "one instance per type".
    ///
    /// Returns the derived identifier.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// struct Settings {
    ///     retries: u32,
    /// }
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create_auto(Settings { retries: 3 });
    ///
    /// assert_eq!(registry.get_auto::<Settings>().retries, 3);
    /// ```
    pub fn create_auto<T: Any>(&self, value: T) -> String {
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
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create("answer", 42_u64);
    ///
    /// assert!(registry.get::<u64>("answer").succeeded());
    /// assert!(!registry.get::<String>("answer").succeeded());
    /// assert!(!registry.get::<u64>("nonexistent").succeeded());
    /// ```
    #[must_use]
    pub fn get<T: Any>(&self, id: &str) -> LocalHandle<T> {
        LocalHandle::new(self.try_get(id).ok())
    }

    /// Looks up the auto-named entry for `T`, equivalent to `get::<T>(type_label::<T>())`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create_auto(42_u64);
    ///
    /// assert_eq!(*registry.get_auto::<u64>(), 42);
    /// ```
    #[must_use]
    pub fn get_auto<T: Any>(&self) -> LocalHandle<T> {
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
    /// use keyed_registry::{LocalRegistry, RegistryError};
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create("answer", 42_u64);
    ///
    /// assert_eq!(*registry.try_get::<u64>("answer").unwrap(), 42);
    ///
    /// assert!(matches!(
    ///     registry.try_get::<String>("answer"),
    ///     Err(RegistryError::TypeMismatch { .. })
    /// ));
    /// assert!(matches!(
    ///     registry.try_get::<u64>("nonexistent"),
    ///     Err(RegistryError::NotFound { .. })
    /// ));
    /// ```
    pub fn try_get<T: Any>(&self, id: &str) -> Result<Rc<T>, RegistryError> {
        let map = self.inner.borrow();

        let entry = map.get(id).ok_or_else(|| RegistryError::NotFound {
            identifier: id.to_string(),
        })?;

        Rc::clone(&entry.instance)
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
    pub fn try_get_auto<T: Any>(&self) -> Result<Rc<T>, RegistryError> {
        self.try_get(type_label::<T>())
    }

    /// Removes the entry at `id` if present; silently does nothing otherwise.
    ///
    /// Outstanding shared views of the removed instance stay valid; only the registry's
    /// ownership share is released.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create("ephemeral", 42_u64);
    ///
    /// registry.destroy("ephemeral");
    /// assert!(!registry.get::<u64>("ephemeral").succeeded());
    ///
    /// // Destroying again is a no-op, not an error.
    /// registry.destroy("ephemeral");
    /// ```
    pub fn destroy(&self, id: &str) {
        self.inner.borrow_mut().remove(id);
    }

    /// Removes the auto-named entry for `T`, equivalent to `destroy(type_label::<T>())`.
    pub fn destroy_auto<T: Any>(&self) {
        self.destroy(type_label::<T>());
    }

    /// Removes every entry in one bulk clear.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create("a", 1_u32);
    /// registry.create("b", 2_u32);
    ///
    /// registry.destroy_all();
    /// assert!(registry.is_empty());
    /// ```
    pub fn destroy_all(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Returns whether an entry exists at `id`, regardless of its concrete type.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.borrow().contains_key(id)
    }

    /// Returns the number of entries currently stored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    ///
    /// assert_eq!(registry.len(), 0);
    ///
    /// registry.create("a", 1_u32);
    /// registry.create("b", "two".to_string());
    ///
    /// assert_eq!(registry.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl Default for LocalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LocalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl fmt::Debug for LocalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalEntry")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use static_assertions::assert_not_impl_any;

    use super::LocalRegistry;
    use crate::{RegistryError, type_label};

    #[test]
    fn single_threaded_assertions() {
        // LocalRegistry should NOT be Send or Sync - it's single-threaded only
        assert_not_impl_any!(LocalRegistry: Send);
        assert_not_impl_any!(LocalRegistry: Sync);
    }

    #[test]
    fn create_returns_the_identifier() {
        let registry = LocalRegistry::new();

        assert_eq!(registry.create("answer", 42_u64), "answer");
        assert_eq!(registry.create_auto(1_u32), type_label::<u32>());
    }

    #[test]
    fn entries_survive_unrelated_creates() {
        let registry = LocalRegistry::new();

        registry.create("first", 1_u32);
        registry.create("second", 2_u32);
        registry.create("third", "three".to_string());

        assert_eq!(*registry.get::<u32>("first"), 1);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn create_with_same_identifier_replaces() {
        let registry = LocalRegistry::new();

        registry.create("slot", 1_u32);
        registry.create("slot", 2_u32);

        assert_eq!(registry.len(), 1);
        assert_eq!(*registry.get::<u32>("slot"), 2);
    }

    #[test]
    fn replacement_may_change_the_stored_type() {
        let registry = LocalRegistry::new();

        registry.create("slot", 1_u32);
        registry.create("slot", "text".to_string());

        assert!(!registry.get::<u32>("slot").succeeded());
        assert_eq!(*registry.get::<String>("slot"), "text");
    }

    #[test]
    fn auto_naming_keeps_one_instance_per_type() {
        let registry = LocalRegistry::new();

        registry.create_auto("first".to_string());
        registry.create_auto("second".to_string());

        assert_eq!(registry.len(), 1);
        assert_eq!(*registry.get_auto::<String>(), "second");
    }

    #[test]
    fn miss_is_not_fatal() {
        let registry = LocalRegistry::new();

        let handle = registry.get::<u64>("nonexistent");
        assert!(!handle.succeeded());
        assert!(handle.instance().is_none());
    }

    #[test]
    fn try_get_distinguishes_not_found_from_mismatch() {
        let registry = LocalRegistry::new();
        registry.create("x", 42_u64);

        assert!(matches!(
            registry.try_get::<u64>("nonexistent"),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(matches!(
            registry.try_get::<String>("x"),
            Err(RegistryError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn type_mismatch_reports_both_type_names() {
        let registry = LocalRegistry::new();
        registry.create("x", 42_u64);

        let Err(RegistryError::TypeMismatch {
            identifier,
            stored,
            requested,
        }) = registry.try_get::<String>("x")
        else {
            panic!("expected a type mismatch");
        };

        assert_eq!(identifier, "x");
        assert_eq!(stored, type_label::<u64>());
        assert_eq!(requested, type_label::<String>());
    }

    #[test]
    fn destroy_is_idempotent() {
        let registry = LocalRegistry::new();
        registry.create("x", 42_u64);

        registry.destroy("x");
        registry.destroy("x");
        registry.destroy("never-existed");

        assert!(registry.is_empty());
    }

    #[test]
    fn destroy_auto_removes_the_typed_entry() {
        let registry = LocalRegistry::new();
        registry.create_auto(42_u64);
        registry.create("kept", 1_u32);

        registry.destroy_auto::<u64>();

        assert!(!registry.get_auto::<u64>().succeeded());
        assert!(registry.contains("kept"));
    }

    #[test]
    fn destroy_all_clears_everything() {
        let registry = LocalRegistry::new();
        registry.create("a", 1_u32);
        registry.create_auto("b".to_string());

        registry.destroy_all();

        assert!(registry.is_empty());
        assert!(!registry.get::<u32>("a").succeeded());
        assert!(!registry.get_auto::<String>().succeeded());
    }

    #[test]
    fn views_outlive_destroyed_entries() {
        let registry = LocalRegistry::new();
        registry.create("x", "still here".to_string());

        let view = registry.get::<String>("x").into_instance().unwrap();
        registry.destroy("x");

        assert_eq!(*view, "still here");
        assert_eq!(Rc::strong_count(&view), 1);
    }

    #[test]
    fn views_outlive_the_registry_itself() {
        let registry = LocalRegistry::new();
        registry.create("x", 42_u64);

        let view = registry.get::<u64>("x").into_instance().unwrap();
        drop(registry);

        assert_eq!(*view, 42);
    }

    #[test]
    fn clones_share_the_same_state() {
        let registry = LocalRegistry::new();
        let clone = registry.clone();

        registry.create("via-original", 1_u32);
        clone.create("via-clone", 2_u32);

        assert_eq!(registry.len(), 2);
        assert_eq!(*registry.get::<u32>("via-clone"), 2);
    }
}
