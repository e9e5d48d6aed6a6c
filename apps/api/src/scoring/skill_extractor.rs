//! Skill Extractor: finds which taxonomy skills a piece of text mentions.

use std::collections::BTreeSet;

use tracing::debug;

use crate::taxonomy::SkillTaxonomy;

/// Returns every universe skill that occurs in `text` as a whole-word,
/// case-insensitive match. Multi-word skills must appear as a contiguous phrase.
pub fn extract_skills(text: &str, taxonomy: &SkillTaxonomy) -> BTreeSet<String> {
    if text.trim().is_empty() {
        return BTreeSet::new();
    }

    let found: BTreeSet<String> = taxonomy
        .patterns()
        .iter()
        .filter(|p| p.regex.is_match(text))
        .map(|p| p.skill.clone())
        .collect();

    debug!(found = found.len(), "Skill extraction complete");
    found
}
