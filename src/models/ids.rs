//! Opaque identifiers for cells and blocks
//!
//! Ids are generated once and never rewritten: they survive splits, collapses,
//! undo/redo and save/reload round-trips.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(
    /// Stable identifier of a grid cell
    CellId,
    "cell"
);

define_id!(
    /// Stable identifier of a content block
    BlockId,
    "block"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = CellId::generate();
        let b = CellId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("cell-"));
        assert!(BlockId::generate().as_str().starts_with("block-"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = CellId::from("cell-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cell-1\"");
    }
}
