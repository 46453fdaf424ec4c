//! Stable ID newtypes for program entities.
//!
//! All IDs are distinct newtype wrappers over `String`, providing type safety
//! so that a `StatId` cannot be accidentally used where an `ExprId` is
//! expected. On the wire they serialize as bare strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Expression node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExprId(pub String);

/// Statement node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatId(pub String);

/// Statement list identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatListId(pub String);

impl StatListId {
    /// The id of the program's top-level statement list.
    pub const ENTRY: &'static str = "entry";

    /// Returns the distinguished entry list id.
    pub fn entry() -> Self {
        StatListId(Self::ENTRY.to_string())
    }

    pub fn is_entry(&self) -> bool {
        self.0 == Self::ENTRY
    }
}

macro_rules! string_id_impls {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                /// Renders a counter value as an id.
                pub fn from_counter(n: u64) -> Self {
                    $ty(n.to_string())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $ty {
                fn from(s: &str) -> Self {
                    $ty(s.to_string())
                }
            }

            impl From<String> for $ty {
                fn from(s: String) -> Self {
                    $ty(s)
                }
            }
        )*
    };
}

string_id_impls!(ExprId, StatId, StatListId);
