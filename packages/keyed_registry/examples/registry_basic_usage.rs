//! Basic usage of the thread-safe `Registry`: shared access from multiple threads and
//! views that outlive their entries.

use std::thread;

use keyed_registry::Registry;

#[derive(Debug)]
struct ConnectionPool {
    endpoint: String,
    size: usize,
}

fn main() {
    let registry = Registry::new();

    registry.create(
        "primary-db",
        ConnectionPool {
            endpoint: "db.internal:5432".to_string(),
            size: 16,
        },
    );

    // Registry handles are cheap to clone and share across threads.
    let workers: Vec<_> = (0..3)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                let pool = registry.get::<ConnectionPool>("primary-db");
                println!("worker {i} uses {} (size {})", pool.endpoint, pool.size);
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    // A view taken before destruction keeps the object alive afterwards.
    let survivor = registry
        .get::<ConnectionPool>("primary-db")
        .into_instance()
        .unwrap();
    registry.destroy("primary-db");

    assert!(!registry.contains("primary-db"));
    println!("still readable after destroy: {}", survivor.endpoint);
}
