//! Integration tests for `LocalRegistry` driving the full create/get/destroy surface the way
//! a host application would, including mixed concrete types behind one registry.

use keyed_registry::{LocalRegistry, RegistryError, type_label};

/// A capability shared by the demonstration types. Stored types are always retrieved by
/// concrete type; the trait only exists to show unrelated types living in one registry.
trait Animal {
    fn talk(&self) -> String;
}

struct Dog {
    breed: String,
}

impl Dog {
    fn new(breed: impl Into<String>) -> Self {
        Self {
            breed: breed.into(),
        }
    }
}

impl Default for Dog {
    fn default() -> Self {
        Self::new("Unknown")
    }
}

impl Animal for Dog {
    fn talk(&self) -> String {
        format!("{} woof", self.breed)
    }
}

struct Cat;

impl Animal for Cat {
    fn talk(&self) -> String {
        "Meow".to_string()
    }
}

#[test]
fn end_to_end_animal_scenario() {
    let registry = LocalRegistry::new();

    // One auto-named instance of each type, plus an explicitly keyed second dog.
    registry.create_auto(Dog::default());
    registry.create_auto(Cat);
    registry.create("2", Dog::new("German Shepard"));

    let cat = registry.get_auto::<Cat>();
    assert!(cat.succeeded());
    assert_eq!(cat.talk(), "Meow");

    assert_eq!(registry.get_auto::<Dog>().talk(), "Unknown woof");
    assert_eq!(registry.get::<Dog>("2").talk(), "German Shepard woof");
}

#[test]
fn mismatched_type_never_yields_a_view() {
    let registry = LocalRegistry::new();
    registry.create("x", Dog::default());

    let as_cat = registry.get::<Cat>("x");
    assert!(!as_cat.succeeded());
    assert!(as_cat.instance().is_none());

    // The explicit form names both the stored and the requested type.
    assert!(matches!(
        registry.try_get::<Cat>("x"),
        Err(RegistryError::TypeMismatch { .. })
    ));
}

#[test]
fn auto_name_matches_the_type_label() {
    let registry = LocalRegistry::new();

    let id = registry.create_auto(Cat);
    assert_eq!(id, type_label::<Cat>());
    assert!(registry.contains(&id));

    // The auto-named entry is reachable through the explicit form as well.
    assert!(registry.get::<Cat>(&id).succeeded());
}

#[test]
fn replacing_an_auto_named_entry_releases_the_first() {
    let registry = LocalRegistry::new();

    registry.create_auto(Dog::new("Beagle"));
    let first = registry.get_auto::<Dog>().into_instance().unwrap();

    registry.create_auto(Dog::new("Collie"));

    // The registry now answers with the second instance; the first survives only through
    // the view we took before the replacement.
    assert_eq!(registry.get_auto::<Dog>().talk(), "Collie woof");
    assert_eq!(first.talk(), "Beagle woof");
    assert_eq!(registry.len(), 1);
}

#[test]
fn destroy_all_then_get_reports_not_found() {
    let registry = LocalRegistry::new();

    registry.create_auto(Dog::default());
    registry.create_auto(Cat);
    registry.create("2", Dog::new("German Shepard"));

    registry.destroy_all();

    for lookup in [
        registry.try_get_auto::<Dog>(),
        registry.try_get::<Dog>("2"),
    ] {
        assert!(matches!(lookup, Err(RegistryError::NotFound { .. })));
    }
    assert!(matches!(
        registry.try_get_auto::<Cat>(),
        Err(RegistryError::NotFound { .. })
    ));
}

#[test]
fn handles_can_be_kept_and_reused() {
    let registry = LocalRegistry::new();
    registry.create("dog", Dog::new("Terrier"));

    let handle = registry.get::<Dog>("dog");
    let kept = handle.clone();

    // Lookups are non-destructive; both the registry and retained handles keep answering.
    assert_eq!(registry.get::<Dog>("dog").talk(), "Terrier woof");
    assert_eq!(kept.talk(), "Terrier woof");
}
