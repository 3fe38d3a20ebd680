//! Typed row identifiers
//!
//! Every entity gets its own UUID newtype so a `ClientId` can never be passed
//! where a `ProductId` is expected. Ids are UUID v7, so sorting them follows
//! creation order. They display with a short prefix (`CLI-...`) and parse
//! with or without it; on the wire they are bare UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bare = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(bare).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(ClientId, "CLI");
define_id!(CategoryId, "CAT");
define_id!(ProductId, "PRD");
define_id!(InvoiceId, "INV");
define_id!(
    /// Stable id of an invoice line, so edits can target a line after reordering
    InvoiceLineId,
    "LIN"
);
define_id!(UserId, "USR");
