//! Role Matcher: scores found skills against every role in the taxonomy.
//!
//! Algorithm:
//! 1. For each role (taxonomy order): matched = required ∩ found, missing = required − matched
//! 2. score = floor(100 × |matched| / |required|)
//! 3. Roles with no matched skill are dropped
//! 4. ats_score = floor(100 × |found ∩ universe| / |universe|)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::scoring::truncated_percent;
use crate::taxonomy::SkillTaxonomy;

/// Per-role outcome of a match. `matched` and `missing` keep the role's declared skill order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMatch {
    pub role: String,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub score: u8, // 0 – 100
}

/// Returns the roles with at least one matched skill plus the aggregate ATS score.
pub fn match_roles(found: &BTreeSet<String>, taxonomy: &SkillTaxonomy) -> (Vec<RoleMatch>, u8) {
    let mut role_matches = Vec::new();

    for requirement in taxonomy.roles() {
        let (matched, missing): (Vec<String>, Vec<String>) = requirement
            .skills
            .iter()
            .cloned()
            .partition(|skill| found.contains(skill));

        if matched.is_empty() {
            continue;
        }

        let score = truncated_percent(matched.len(), requirement.skills.len());
        role_matches.push(RoleMatch {
            role: requirement.role.clone(),
            matched,
            missing,
            score,
        });
    }

    let in_universe = found.iter().filter(|s| taxonomy.contains_skill(s)).count();
    let ats_score = truncated_percent(in_universe, taxonomy.universe_size());

    (role_matches, ats_score)
}
