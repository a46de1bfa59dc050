//! Snapshot and track identifiers
//!
//! Both are random UUIDs shown in a short prefixed form (`snap-1a2b3c4d`,
//! `trk-1a2b3c4d`). Users type either form, or any leading part of the
//! UUID, so lookups go through [`IdQuery`] rather than a strict parse.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What a user typed to name a snapshot or track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdQuery<T> {
    /// A complete UUID, with or without the display prefix
    Exact(T),
    /// Leading characters of the UUID, lowercased, prefix stripped
    Prefix(String),
}

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Prefix of the short display form
            pub const PREFIX: &'static str = $display_prefix;

            /// A fresh random id
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Interpret user input as an id
            ///
            /// Returns None when the input cannot be part of a UUID at all.
            pub fn query(input: &str) -> Option<IdQuery<Self>> {
                let input = input.trim().to_ascii_lowercase();
                let bare = input.strip_prefix($display_prefix).unwrap_or(&input);

                if let Ok(uuid) = Uuid::parse_str(bare) {
                    return Some(IdQuery::Exact(Self(uuid)));
                }

                let plausible = !bare.is_empty()
                    && bare.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
                plausible.then(|| IdQuery::Prefix(bare.to_string()))
            }

            /// Whether the hyphenated UUID starts with `prefix`
            pub fn starts_with(&self, prefix: &str) -> bool {
                self.0.hyphenated().to_string().starts_with(prefix)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }
    };
}

define_id!(SnapshotId, "snap-");
define_id!(TrackId, "trk-");
