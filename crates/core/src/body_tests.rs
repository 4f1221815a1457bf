use super::*;
use crate::config::signature;
use proptest::prelude::*;

const SIGNATURE: &str = "GitHub Action status on abc123 generated by comment-failure-action";

#[test]
fn test_section_parse_reads_owner() {
    let section = Section::parse("<!-- WORKFLOW:build -->\n### build\nNo jobs failed :+1:");

    assert_eq!(section.owner(), Some("build"));
    assert!(section.is_owned_by("build"));
    assert!(!section.is_owned_by("lint"));
}

#[test]
fn test_section_parse_without_tag() {
    let section = Section::parse("Some text written by hand");

    assert_eq!(section.owner(), None);
    assert!(!section.is_owned_by("build"));
    assert_eq!(section.text(), "Some text written by hand");
}

#[test]
fn test_section_parse_uses_first_tag() {
    let section = Section::parse("<!-- WORKFLOW:build -->\ntext\n<!-- WORKFLOW:lint -->");

    assert_eq!(section.owner(), Some("build"));
}

#[test]
fn test_section_parse_identity_containing_closing_marker() {
    let section = Section::parse(Section::owned_by("deploy --> prod", "### deploy --> prod").text());

    assert_eq!(section.owner(), Some("deploy --> prod"));
    assert!(section.is_owned_by("deploy --> prod"));
    assert!(!section.is_owned_by("deploy"));
}

#[test]
fn test_section_parse_identity_containing_newline() {
    let section = Section::parse(Section::owned_by("release\nnightly", "### release").text());

    assert_eq!(section.owner(), Some("release\nnightly"));
    assert!(section.is_owned_by("release\nnightly"));
    assert!(!section.is_owned_by("release"));
}

#[test]
fn test_section_inline_tag_is_not_ownership() {
    let section = Section::parse("mentions <!-- WORKFLOW:build --> inline");

    assert_eq!(section.owner(), None);
    assert!(!section.is_owned_by("build"));
}

#[test]
fn test_section_owned_by_places_tag_first() {
    let section = Section::owned_by("build", "### build");

    assert_eq!(section.text(), "<!-- WORKFLOW:build -->\n### build");
    assert_eq!(section.owner(), Some("build"));
    assert_eq!(Section::parse(section.text()), section);
}

#[test]
fn test_render_matches_wire_grammar() {
    let sections = vec![
        Section::parse("<!-- WORKFLOW:build -->\nA"),
        Section::parse("<!-- WORKFLOW:lint -->\nB"),
    ];

    let body = render(&sections, SIGNATURE);

    assert_eq!(
        body,
        "GitHub Action status on abc123 generated by comment-failure-action\n<!-- SEPARATOR -->\n<!-- WORKFLOW:build -->\nA\n<!-- SEPARATOR -->\n<!-- WORKFLOW:lint -->\nB"
    );
}

#[test]
fn test_render_without_sections_is_signature_only() {
    assert_eq!(render(&[], SIGNATURE), SIGNATURE);
    assert!(parse(SIGNATURE, SIGNATURE).is_empty());
}

#[test]
fn test_parse_drops_signature_pieces() {
    let body = format!(
        "{}\n<!-- SEPARATOR -->\n<!-- WORKFLOW:build -->\nA\n<!-- SEPARATOR -->\nmentions {} inline",
        SIGNATURE, SIGNATURE
    );

    let sections = parse(&body, SIGNATURE);

    assert_eq!(sections, vec![Section::parse("<!-- WORKFLOW:build -->\nA")]);
}

#[test]
fn test_parse_keeps_signature_of_other_commit() {
    let other = signature("def456");
    let body = format!("{}\n<!-- SEPARATOR -->\n<!-- WORKFLOW:build -->\nA", other);

    let sections = parse(&body, SIGNATURE);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].text(), other);
}

#[test]
fn test_parse_malformed_body_is_permissive() {
    let sections = parse("just some text", SIGNATURE);

    assert_eq!(sections, vec![Section::parse("just some text")]);
}

proptest! {
    #[test]
    fn test_parse_render_round_trip(texts in proptest::collection::vec("[a-zA-Z0-9 :#|<>!\\-\n]{0,60}", 0..6)) {
        for text in &texts {
            prop_assume!(!text.contains(COMMENT_SEPARATOR));
            prop_assume!(!text.contains(SIGNATURE));
        }

        let sections: Vec<Section> = texts.iter().map(|t| Section::parse(t.as_str())).collect();
        let body = render(&sections, SIGNATURE);

        prop_assert_eq!(parse(&body, SIGNATURE), sections);
    }
}
