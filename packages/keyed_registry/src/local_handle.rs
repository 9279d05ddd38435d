use std::any::type_name;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::constants::ERR_EMPTY_HANDLE;

/// The result of a typed lookup in a [`LocalRegistry`][crate::LocalRegistry]: a success flag
/// plus a shared, non-owning view of the stored instance.
///
/// The view is reference-counted. It remains valid even if the entry is later destroyed or
/// overwritten in the registry; the underlying object is freed only once the registry's share
/// and every outstanding view are gone.
///
/// An unsuccessful handle (entry absent, or present with a different concrete type) carries no
/// view. Check [`succeeded()`][Self::succeeded] or use [`instance()`][Self::instance] for
/// checked access; dereferencing skips the check for ergonomic chaining and panics if the
/// lookup did not succeed.
///
/// # Single-threaded design
///
/// This type is designed for single-threaded use and is neither [`Send`] nor [`Sync`].
/// For multi-threaded scenarios, use [`Handle`][crate::Handle] instead.
///
/// # Example
///
/// ```rust
/// use keyed_registry::LocalRegistry;
///
/// let registry = LocalRegistry::new();
/// registry.create("greeting", "hello".to_string());
///
/// let handle = registry.get::<String>("greeting");
/// assert!(handle.succeeded());
///
/// // Pass-through access to the stored instance.
/// assert_eq!(handle.len(), 5);
/// ```
pub struct LocalHandle<T> {
    /// The shared view of the stored instance; `None` when the lookup did not succeed.
    instance: Option<Rc<T>>,
}

impl<T> LocalHandle<T> {
    pub(crate) fn new(instance: Option<Rc<T>>) -> Self {
        Self { instance }
    }

    /// Returns whether the lookup found an entry of the requested type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create("present", 42_u64);
    ///
    /// assert!(registry.get::<u64>("present").succeeded());
    /// assert!(!registry.get::<u64>("absent").succeeded());
    /// ```
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.instance.is_some()
    }

    /// Returns the shared view of the stored instance, or `None` if the lookup did not
    /// succeed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create("answer", 42_u64);
    ///
    /// if let Some(answer) = registry.get::<u64>("answer").instance() {
    ///     assert_eq!(**answer, 42);
    /// }
    /// ```
    #[must_use]
    pub fn instance(&self) -> Option<&Rc<T>> {
        self.instance.as_ref()
    }

    /// Consumes the handle and returns the shared view, or `None` if the lookup did not
    /// succeed.
    ///
    /// Useful when the view should be stored somewhere that outlives the lookup.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::LocalRegistry;
    ///
    /// let registry = LocalRegistry::new();
    /// registry.create("answer", 42_u64);
    ///
    /// let view = registry.get::<u64>("answer").into_instance().unwrap();
    ///
    /// // The view stays valid even after the entry is destroyed.
    /// registry.destroy("answer");
    /// assert_eq!(*view, 42);
    /// ```
    #[must_use]
    pub fn into_instance(self) -> Option<Rc<T>> {
        self.instance
    }
}

impl<T> Clone for LocalHandle<T> {
    /// Creates another handle sharing the same view.
    fn clone(&self) -> Self {
        Self {
            instance: self.instance.clone(),
        }
    }
}

impl<T> Deref for LocalHandle<T> {
    type Target = T;

    /// Provides direct access to the stored instance without checking the success flag.
    ///
    /// # Panics
    ///
    /// Panics if the lookup did not succeed. Callers that cannot rule this out should use
    /// [`instance()`][Self::instance] instead.
    fn deref(&self) -> &Self::Target {
        self.instance.as_deref().expect(ERR_EMPTY_HANDLE)
    }
}

impl<T> fmt::Debug for LocalHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalHandle")
            .field("type", &type_name::<T>())
            .field("succeeded", &self.succeeded())
            .finish()
    }
}
