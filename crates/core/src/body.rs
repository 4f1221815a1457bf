//! # Comment body codec
//!
//! A managed comment is stored on the platform as plain Markdown with the
//! following grammar:
//!
//! ```text
//! Signature ( "\n<!-- SEPARATOR -->\n" Section )*
//! ```
//!
//! Each section starts with an ownership tag `<!-- WORKFLOW:<identity> -->`.
//! The signature identifies the comment for one commit and is regenerated on
//! every write. It is never part of a section.
//!
//! Parsing is permissive: a body that does not follow the grammar yields
//! whatever pieces the separator produces. Round-tripping is only stable when
//! no section contains the separator or the signature.

use crate::config::{ownership_tag, COMMENT_SEPARATOR, WORKFLOW_TAG_REGEX};

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;

/// A block of comment text owned by at most one workflow.
///
/// The owner is read from the first ownership tag in the text when the
/// section is parsed. An ownership tag only counts when it fills whole
/// lines. The text itself is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    owner: Option<String>,
    text: String,
}

impl Section {
    /// Parses a raw piece of comment text into a section.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let owner = WORKFLOW_TAG_REGEX
            .captures(&text)
            .map(|captures| captures[1].to_string());

        Self { owner, text }
    }

    /// Creates a section owned by `workflow`.
    ///
    /// The ownership tag is placed on the first line, followed by `content`.
    pub fn owned_by(workflow: &str, content: &str) -> Self {
        Self {
            owner: Some(workflow.to_string()),
            text: format!("{}\n{}", ownership_tag(workflow), content),
        }
    }

    /// The workflow that owns this section, if it carries an ownership tag.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the text carries the ownership tag of `workflow` on lines of its own.
    ///
    /// The tag is compared verbatim, so identities containing ` -->` or line
    /// breaks still match exactly their own section.
    pub fn is_owned_by(&self, workflow: &str) -> bool {
        let tag = ownership_tag(workflow);
        self.text.match_indices(&tag).any(|(start, _)| {
            let before = &self.text[..start];
            let after = &self.text[start + tag.len()..];
            (before.is_empty() || before.ends_with('\n'))
                && (after.is_empty() || after.starts_with('\n'))
        })
    }
}

/// Splits a comment body into its sections.
///
/// Every piece containing `signature` is dropped, which removes the leading
/// signature line. The remaining pieces are returned in their original order.
pub fn parse(body: &str, signature: &str) -> Vec<Section> {
    body.split(COMMENT_SEPARATOR)
        .filter(|piece| !piece.contains(signature))
        .map(Section::parse)
        .collect()
}

/// Renders sections into a comment body headed by `signature`.
pub fn render(sections: &[Section], signature: &str) -> String {
    std::iter::once(signature)
        .chain(sections.iter().map(Section::text))
        .collect::<Vec<_>>()
        .join(COMMENT_SEPARATOR)
}
