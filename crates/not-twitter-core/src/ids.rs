//! Identifier types for not-twitter.
//!
//! Every row in the store is keyed by a database-generated integer. The
//! newtypes here keep user, tweet, and media identifiers from being mixed up
//! at call sites.
//!
//! # Macro-based ID Types
//!
//! The `int_id_type!` macro reduces boilerplate for integer identifier types,
//! ensuring consistent serialization, conversion, and display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define an integer identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `i64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (transparent, as a bare integer)
/// - `Display`, `Debug`
/// - `From<i64>`, `Into<i64>`
///
/// # Example
///
/// ```ignore
/// int_id_type!(MyId, "A custom identifier type.");
/// let id = MyId::new(7);
/// assert_eq!(id.get(), 7);
/// ```
macro_rules! int_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database identifier.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Return the raw database identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

int_id_type!(UserId, "A user identifier.");
int_id_type!(TweetId, "A tweet identifier.");
int_id_type!(MediaId, "A media identifier.\n\nMedia rows are uploaded first and attached to a tweet later.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_serializes_as_bare_integer() {
        let id = TweetId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: TweetId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn id_display_and_debug() {
        let id = UserId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(format!("{id:?}"), "UserId(7)");
    }

    #[test]
    fn ids_order_by_value() {
        let mut ids = vec![MediaId::new(3), MediaId::new(1), MediaId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![MediaId::new(1), MediaId::new(2), MediaId::new(3)]);
    }
}
