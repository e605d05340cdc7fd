//! Typed surrogate ids for type-safe dimension references.
//!
//! Using typed ids prevents accidentally passing a `ClientId` where a
//! `ProjectId` is expected. The warehouse assigns surrogate keys from
//! `BIGSERIAL` sequences, so the inner representation is `i64`.

use serde::{Deserialize, Serialize};

/// Macro to generate typed surrogate id wrappers.
macro_rules! surrogate_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw database-assigned key.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the inner key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

surrogate_id!(ProjectId, "Surrogate key of a project dimension row.");
surrogate_id!(ClientId, "Surrogate key of a client dimension row.");
surrogate_id!(AccountId, "Surrogate key of an account dimension row.");
surrogate_id!(PeriodId, "Surrogate key of a period dimension row.");
surrogate_id!(ResourceId, "Surrogate key of a resource dimension row.");
surrogate_id!(FactId, "Surrogate key of a fact table row.");
surrogate_id!(LedgerRowId, "Primary key of a raw ledger source row.");
