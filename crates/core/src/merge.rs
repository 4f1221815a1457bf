//! Replace-or-append merging of a workflow's section into an existing comment.

use crate::body::Section;

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;

/// Merges `new_section` into `old_sections`.
///
/// The first old section owned by the same workflow is replaced in place.
/// All other sections, including any later duplicates of that owner, are
/// kept unchanged and in order. When no section matches, `new_section` is
/// appended at the end.
///
/// A section without an owner never matches, and neither does any section
/// when `new_section` itself has no owner.
pub fn reconcile(new_section: &Section, old_sections: &[Section]) -> Vec<Section> {
    let position = new_section
        .owner()
        .and_then(|owner| old_sections.iter().position(|s| s.is_owned_by(owner)));

    let mut sections = old_sections.to_vec();
    match position {
        Some(index) => sections[index] = new_section.clone(),
        None => sections.push(new_section.clone()),
    }

    sections
}
