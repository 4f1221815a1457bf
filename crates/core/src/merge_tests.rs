use super::*;
use proptest::prelude::*;

fn owned(workflow: &str, content: &str) -> Section {
    Section::owned_by(workflow, content)
}

#[test]
fn test_reconcile_into_empty_appends() {
    let new = owned("build", "new");

    assert_eq!(reconcile(&new, &[]), vec![new.clone()]);
}

#[test]
fn test_reconcile_appends_when_owner_absent() {
    let other = owned("lint", "B");
    let new = owned("build", "new");

    assert_eq!(reconcile(&new, &[other.clone()]), vec![other, new]);
}

#[test]
fn test_reconcile_replaces_in_place() {
    let a = owned("build", "old");
    let b = owned("lint", "B");
    let c = owned("test", "C");
    let new = owned("lint", "new");

    assert_eq!(
        reconcile(&new, &[a.clone(), b, c.clone()]),
        vec![a, new, c]
    );
}

#[test]
fn test_reconcile_replaces_first_duplicate_only() {
    let a = owned("build", "A");
    let b = owned("lint", "B");
    let c = owned("build", "C");
    let new = owned("build", "new");

    assert_eq!(
        reconcile(&new, &[a, b.clone(), c.clone()]),
        vec![new, b, c]
    );
}

#[test]
fn test_reconcile_ignores_untagged_sections() {
    let untagged = Section::parse("written by hand");
    let new = owned("build", "new");

    assert_eq!(
        reconcile(&new, &[untagged.clone()]),
        vec![untagged, new]
    );
}

#[test]
fn test_reconcile_does_not_match_on_workflow_prefix() {
    let longer = owned("build-docs", "A");
    let new = owned("build", "new");

    assert_eq!(
        reconcile(&new, &[longer.clone()]),
        vec![longer, new]
    );
}

#[test]
fn test_reconcile_round_trip_keeps_one_section_for_unusual_identities() {
    let signature = crate::config::signature("abc123");

    for workflow in ["deploy --> prod", "release\nnightly", "a -->"] {
        let new = crate::summary::render(workflow, &[]);

        let once = reconcile(&new, &[]);
        let stored = crate::body::parse(&crate::body::render(&once, &signature), &signature);
        let twice = reconcile(&new, &stored);

        assert_eq!(twice.len(), 1, "'{}' was duplicated", workflow);
        assert_eq!(twice, once);
    }
}

#[test]
fn test_reconcile_distinguishes_identity_prefixes_with_closing_marker() {
    let longer = owned("deploy --> prod", "A");
    let new = owned("deploy", "new");

    assert_eq!(
        reconcile(&new, &[longer.clone()]),
        vec![longer, new]
    );
}

fn arb_section() -> impl Strategy<Value = Section> {
    prop_oneof![
        ("(build|lint|test|docs)", "[a-z ]{0,12}").prop_map(|(w, c)| Section::owned_by(&w, &c)),
        "[a-z ]{0,12}".prop_map(|t| Section::parse(t)),
    ]
}

proptest! {
    #[test]
    fn test_reconcile_is_idempotent(
        old in proptest::collection::vec(arb_section(), 0..6),
        workflow in "(build|lint|test|docs)",
        content in "[a-z ]{0,12}",
    ) {
        let new = Section::owned_by(&workflow, &content);

        let once = reconcile(&new, &old);
        let twice = reconcile(&new, &once);

        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_reconcile_keeps_other_owners_in_order(
        old in proptest::collection::vec(arb_section(), 0..6),
        workflow in "(build|lint|test|docs)",
    ) {
        let new = Section::owned_by(&workflow, "new");

        let merged = reconcile(&new, &old);
        let others_before: Vec<&Section> = old.iter().filter(|s| !s.is_owned_by(&workflow)).collect();
        let others_after: Vec<&Section> = merged.iter().filter(|s| !s.is_owned_by(&workflow)).collect();

        prop_assert_eq!(others_after, others_before);
        prop_assert!(merged.contains(&new));
    }
}
