use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;

/// One identity entry in the directory source.
///
/// Immutable once fetched. Two records are the same account exactly when
/// their identifiers match; the display name carries no identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Stable identifier, unique within the directory source
    pub id: String,

    /// Human-readable display name
    pub name: String,
}

impl AccountRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        AccountRecord {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for AccountRecord {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.id == other.id
    }
}

impl Eq for AccountRecord {}

impl Hash for AccountRecord {
    fn hash<H: Hasher>(
        &self,
        state: &mut H,
    ) {
        self.id.hash(state);
    }
}
