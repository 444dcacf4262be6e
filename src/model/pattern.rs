use serde::Deserialize;
use serde::Serialize;

use super::AccountRecord;

/// A single policy-supplied match rule over account identifiers.
///
/// Supported forms:
/// - exact: `"alice@corp.test"` matches that identifier only
/// - prefix: `"svc-*"` matches identifiers starting with `svc-`
/// - suffix: `"*@corp.test"` matches identifiers ending with `@corp.test`
/// - `"*"` alone matches every identifier
///
/// A set of patterns is a disjunction: an account is visible if it matches
/// any one of them. Absence of a set (as opposed to an empty set) means no
/// filtering at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RestrictionPattern {
    kind: PatternKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternKind {
    Exact(String),
    Prefix(String),
    Suffix(String),
}

impl RestrictionPattern {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = if let Some(rest) = raw.strip_prefix('*') {
            // "*" itself parses as Suffix("") which matches everything
            PatternKind::Suffix(rest.to_string())
        } else if let Some(head) = raw.strip_suffix('*') {
            PatternKind::Prefix(head.to_string())
        } else {
            PatternKind::Exact(raw)
        };
        RestrictionPattern { kind }
    }

    pub fn matches(
        &self,
        account: &AccountRecord,
    ) -> bool {
        self.matches_id(&account.id)
    }

    pub fn matches_id(
        &self,
        id: &str,
    ) -> bool {
        match &self.kind {
            PatternKind::Exact(s) => id == s,
            PatternKind::Prefix(s) => id.starts_with(s),
            PatternKind::Suffix(s) => id.ends_with(s),
        }
    }
}

impl From<String> for RestrictionPattern {
    fn from(raw: String) -> Self {
        RestrictionPattern::new(raw)
    }
}

impl From<RestrictionPattern> for String {
    fn from(pattern: RestrictionPattern) -> Self {
        match pattern.kind {
            PatternKind::Exact(s) => s,
            PatternKind::Prefix(s) => format!("{s}*"),
            PatternKind::Suffix(s) => format!("*{s}"),
        }
    }
}
