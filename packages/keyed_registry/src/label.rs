use std::any::type_name;

/// Returns the label used as the identifier for auto-named entries of type `T`.
///
/// The label is stable and distinct per concrete type within a running process, which is what
/// gives the auto-naming operations their "one instance per type" semantics. It is not
/// guaranteed stable across builds, so it must not be persisted or sent across processes.
///
/// The label is never what makes typed retrieval safe: lookups always validate the stored
/// concrete type itself, so even two types that happened to share a label could not be
/// misinterpreted as each other.
///
/// # Example
///
/// ```rust
/// use keyed_registry::{LocalRegistry, type_label};
///
/// let registry = LocalRegistry::new();
///
/// let id = registry.create_auto(42_u64);
/// assert_eq!(id, type_label::<u64>());
/// ```
#[must_use]
pub fn type_label<T: 'static>() -> &'static str {
    type_name::<T>()
}
