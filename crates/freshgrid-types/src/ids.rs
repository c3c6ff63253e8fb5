//! Type-safe identifier wrappers around `u64`.
//!
//! Every runtime entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. IDs are allocated
//! sequentially by their owner, so ordering by ID is creation order and
//! iteration over ID-keyed maps is deterministic.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Return the inner `u64` value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }

            /// Return the identifier allocated after this one.
            ///
            /// Saturates at `u64::MAX`; callers allocating that many entities
            /// have bigger problems than a repeated ID.
            pub const fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a cargo entity in the simulation.
    CargoId
}

define_id! {
    /// Unique identifier for a display shelf that accepts stocked cargo.
    ShelfId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_allocation() {
        let first = CargoId(1);
        let second = first.next();
        assert!(first < second);
        assert_eq!(second.into_inner(), 2);
    }

    #[test]
    fn next_saturates() {
        assert_eq!(CargoId(u64::MAX).next(), CargoId(u64::MAX));
    }

    #[test]
    fn id_serializes_as_number() {
        let json = serde_json::to_string(&CargoId(7)).unwrap();
        assert_eq!(json, "7");
        let back: CargoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CargoId(7));
    }

    #[test]
    fn display_prints_inner_value() {
        assert_eq!(ShelfId(12).to_string(), "12");
    }
}
