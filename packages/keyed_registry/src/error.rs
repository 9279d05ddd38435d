use thiserror::Error;

/// Errors that can occur when looking up a typed entry in a registry.
///
/// Lookup failures are local, value-based outcomes; the registry never aborts the host
/// program. The handle-returning `get` operations collapse both variants into an unsuccessful
/// handle, while the `try_get` operations surface the distinction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// No entry exists under the requested identifier.
    #[error("no entry exists under identifier '{identifier}'")]
    NotFound {
        /// The identifier that was looked up.
        identifier: String,
    },

    /// An entry exists under the requested identifier, but its concrete type is not the one
    /// the caller asked for.
    #[error("entry '{identifier}' stores a '{stored}' and cannot be viewed as a '{requested}'")]
    TypeMismatch {
        /// The identifier that was looked up.
        identifier: String,

        /// The type name recorded when the entry was created.
        stored: &'static str,

        /// The type name the caller requested.
        requested: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(RegistryError: Send, Sync, Debug);

    #[test]
    fn not_found_names_the_identifier() {
        let error = RegistryError::NotFound {
            identifier: "missing".to_string(),
        };

        assert!(error.to_string().contains("missing"));
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let error = RegistryError::TypeMismatch {
            identifier: "x".to_string(),
            stored: "alloc::string::String",
            requested: "u64",
        };

        let message = error.to_string();
        assert!(message.contains("alloc::string::String"));
        assert!(message.contains("u64"));
    }
}
