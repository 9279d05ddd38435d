use std::any::type_name;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::constants::ERR_EMPTY_HANDLE;

/// The result of a typed lookup in a [`Registry`][crate::Registry]: a success flag plus a
/// shared, non-owning view of the stored instance.
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
/// # Thread safety
///
/// The handle is [`Send`] and [`Sync`] whenever `T` is, so views may be passed freely between
/// threads.
///
/// # Example
///
/// ```rust
/// use keyed_registry::Registry;
///
/// let registry = Registry::new();
/// registry.create("greeting", "hello".to_string());
///
/// let handle = registry.get::<String>("greeting");
/// assert!(handle.succeeded());
///
/// // Pass-through access to the stored instance.
/// assert_eq!(handle.len(), 5);
/// ```
pub struct Handle<T> {
    /// The shared view of the stored instance; `None` when the lookup did not succeed.
    instance: Option<Arc<T>>,
}

impl<T> Handle<T> {
    pub(crate) fn new(instance: Option<Arc<T>>) -> Self {
        Self { instance }
    }

    /// Returns whether the lookup found an entry of the requested type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::Registry;
    ///
    /// let registry = Registry::new();
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
    #[must_use]
    pub fn instance(&self) -> Option<&Arc<T>> {
        self.instance.as_ref()
    }

    /// Consumes the handle and returns the shared view, or `None` if the lookup did not
    /// succeed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_registry::Registry;
    ///
    /// let registry = Registry::new();
    /// registry.create("answer", 42_u64);
    ///
    /// let view = registry.get::<u64>("answer").into_instance().unwrap();
    ///
    /// // The view stays valid even after the entry is destroyed.
    /// registry.destroy("answer");
    /// assert_eq!(*view, 42);
    /// ```
    #[must_use]
    pub fn into_instance(self) -> Option<Arc<T>> {
        self.instance
    }
}

impl<T> Clone for Handle<T> {
    /// Creates another handle sharing the same view.
    fn clone(&self) -> Self {
        Self {
            instance: self.instance.clone(),
        }
    }
}

impl<T> Deref for Handle<T> {
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

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("type", &type_name::<T>())
            .field("succeeded", &self.succeeded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use static_assertions::assert_impl_all;

    use super::Handle;

    assert_impl_all!(Handle<u64>: Send, Sync);

    #[test]
    fn successful_handle_exposes_instance() {
        let handle = Handle::new(Some(Arc::new(42_u64)));

        assert!(handle.succeeded());
        assert_eq!(*handle, 42);
    }

    #[test]
    fn unsuccessful_handle_is_empty() {
        let handle = Handle::<u64>::new(None);

        assert!(!handle.succeeded());
        assert!(handle.instance().is_none());
        assert!(handle.into_instance().is_none());
    }

    #[test]
    #[should_panic(expected = "did not succeed")]
    fn deref_of_unsuccessful_handle_panics() {
        let handle = Handle::<u64>::new(None);

        let _value = *handle;
    }

    #[test]
    fn clone_shares_the_view() {
        let handle = Handle::new(Some(Arc::new("shared".to_string())));
        let cloned = handle.clone();

        assert!(Arc::ptr_eq(
            handle.instance().unwrap(),
            cloned.instance().unwrap()
        ));
    }
}
