//! Heterogeneous types behind one registry: auto-named entries, an explicitly keyed entry,
//! and checked typed retrieval.

use keyed_registry::LocalRegistry;

/// The capability shared by the demonstration types.
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

fn main() {
    let registry = LocalRegistry::new();

    // Create entries with auto naming: the identifier is derived from the type, so at most
    // one auto-named instance of each type exists.
    registry.create_auto(Dog::default());
    registry.create_auto(Cat);

    // Create another dog under the explicit identifier "2", constructed with a breed.
    registry.create("2", Dog::new("German Shepard"));

    // Validate the returned handle before using it.
    let cat = registry.get_auto::<Cat>();
    if cat.succeeded() {
        println!("{}", cat.talk());
    }

    // Or dive straight in; dereferencing panics if the lookup did not succeed.
    println!("{}", registry.get_auto::<Dog>().talk());
    println!("{}", registry.get::<Dog>("2").talk());

    // Asking for the wrong type is a failure, never a misinterpreted view.
    assert!(!registry.get::<Cat>("2").succeeded());
}
