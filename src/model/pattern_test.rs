use super::*;

fn account(id: &str) -> AccountRecord {
    AccountRecord::new(id, id)
}

#[test]
fn exact_pattern_matches_identifier_only() {
    let pattern = RestrictionPattern::new("alice@corp.test");

    assert!(pattern.matches(&account("alice@corp.test")));
    assert!(!pattern.matches(&account("alice@corp.testing")));
    assert!(!pattern.matches(&account("bob@corp.test")));
}

#[test]
fn prefix_pattern_matches_leading_wildcard_tail() {
    let pattern = RestrictionPattern::new("svc-*");

    assert!(pattern.matches(&account("svc-backup")));
    assert!(pattern.matches(&account("svc-")));
    assert!(!pattern.matches(&account("user-svc-backup")));
}

#[test]
fn suffix_pattern_matches_trailing_domain() {
    let pattern = RestrictionPattern::new("*@corp.test");

    assert!(pattern.matches(&account("alice@corp.test")));
    assert!(!pattern.matches(&account("alice@other.test")));
}

#[test]
fn lone_star_matches_everything() {
    let pattern = RestrictionPattern::new("*");

    assert!(pattern.matches(&account("anything")));
    assert!(pattern.matches(&account("")));
}

#[test]
fn round_trips_through_string_form() {
    for raw in ["alice@corp.test", "svc-*", "*@corp.test", "*"] {
        let pattern = RestrictionPattern::new(raw);
        assert_eq!(String::from(pattern), raw);
    }
}
