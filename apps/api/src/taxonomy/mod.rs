//! The fixed role → required-skills mapping every analysis scores against.
//!
//! Built once at startup (built-in defaults or a JSON file), validated, and shared
//! read-only through `AppState` as `Arc<SkillTaxonomy>`.

use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("taxonomy must contain at least one role")]
    NoRoles,

    #[error("role name cannot be empty")]
    EmptyRoleName,

    #[error("duplicate role: {0}")]
    DuplicateRole(String),

    #[error("role '{0}' has no required skills")]
    NoSkills(String),

    #[error("role '{0}' contains an empty skill")]
    EmptySkill(String),

    #[error("failed to build matcher for skill '{skill}': {source}")]
    Pattern {
        skill: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One role and the skills it requires, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub role: String,
    pub skills: Vec<String>,
}

/// A universe skill paired with its compiled whole-word matcher.
#[derive(Debug, Clone)]
pub(crate) struct SkillPattern {
    pub skill: String,
    pub regex: Regex,
}

/// Validated, immutable skill taxonomy.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    roles: Vec<RoleRequirement>,
    universe: Vec<SkillPattern>,
}

const DEFAULT_ROLES: &[(&str, &[&str])] = &[
    (
        "AI/ML Intern",
        &["python", "tensorflow", "pandas", "deep learning", "machine learning"],
    ),
    (
        "Data Analyst",
        &["excel", "sql", "power bi", "python", "data visualization"],
    ),
    (
        "Web Developer",
        &["html", "css", "javascript", "react", "flask"],
    ),
    ("Backend Developer", &["python", "django", "rest api", "sql"]),
    ("Cloud Engineer", &["aws", "azure", "docker", "kubernetes"]),
];

impl SkillTaxonomy {
    /// Validates the roles and compiles one matcher per distinct skill.
    ///
    /// Role names are trimmed; skills are trimmed and lower-cased, and repeated
    /// skills inside a role collapse to their first occurrence.
    pub fn new(roles: Vec<RoleRequirement>) -> Result<Self, TaxonomyError> {
        if roles.is_empty() {
            return Err(TaxonomyError::NoRoles);
        }

        let mut seen_roles = HashSet::new();
        let mut normalized = Vec::with_capacity(roles.len());

        for requirement in roles {
            let role = requirement.role.trim().to_string();
            if role.is_empty() {
                return Err(TaxonomyError::EmptyRoleName);
            }
            if !seen_roles.insert(role.to_lowercase()) {
                return Err(TaxonomyError::DuplicateRole(role));
            }
            if requirement.skills.is_empty() {
                return Err(TaxonomyError::NoSkills(role));
            }

            let mut skills: Vec<String> = Vec::with_capacity(requirement.skills.len());
            for skill in &requirement.skills {
                let skill = skill.trim().to_lowercase();
                if skill.is_empty() {
                    return Err(TaxonomyError::EmptySkill(role));
                }
                if !skills.contains(&skill) {
                    skills.push(skill);
                }
            }

            normalized.push(RoleRequirement { role, skills });
        }

        let mut universe: Vec<SkillPattern> = Vec::new();
        for skill in normalized.iter().flat_map(|r| r.skills.iter()) {
            if universe.iter().any(|p| &p.skill == skill) {
                continue;
            }
            universe.push(SkillPattern {
                skill: skill.clone(),
                regex: whole_word_pattern(skill)?,
            });
        }

        Ok(Self {
            roles: normalized,
            universe,
        })
    }

    /// The built-in five-role taxonomy.
    pub fn builtin() -> Result<Self, TaxonomyError> {
        let roles = DEFAULT_ROLES
            .iter()
            .map(|(role, skills)| RoleRequirement {
                role: role.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        Self::new(roles)
    }

    /// Parses a JSON array of `{ "role": ..., "skills": [...] }` objects.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let roles: Vec<RoleRequirement> = serde_json::from_str(json)?;
        Self::new(roles)
    }

    /// Loads the taxonomy from `path`, or the built-in one when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self, TaxonomyError> {
        let taxonomy = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let taxonomy = Self::from_json(&json)?;
                info!("Loaded skill taxonomy from {}", path.display());
                taxonomy
            }
            None => Self::builtin()?,
        };
        info!(
            roles = taxonomy.roles.len(),
            universe = taxonomy.universe.len(),
            "Skill taxonomy ready"
        );
        Ok(taxonomy)
    }

    pub fn roles(&self) -> &[RoleRequirement] {
        &self.roles
    }

    /// Distinct skills across all roles, in first-appearance order.
    pub fn universe(&self) -> impl Iterator<Item = &str> {
        self.universe.iter().map(|p| p.skill.as_str())
    }

    pub fn universe_size(&self) -> usize {
        self.universe.len()
    }

    pub fn contains_skill(&self, skill: &str) -> bool {
        self.universe.iter().any(|p| p.skill == skill)
    }

    pub(crate) fn patterns(&self) -> &[SkillPattern] {
        &self.universe
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive, whole-word, literal match for `phrase`.
///
/// `\b` only holds next to a word character, so an edge ending in a symbol
/// (`c++`, `c#`, `.net`) is anchored on a non-word neighbour or the text edge instead.
pub(crate) fn whole_word_pattern(phrase: &str) -> Result<Regex, TaxonomyError> {
    let leading = match phrase.chars().next() {
        Some(c) if !is_word_char(c) => r"(?:^|\W)",
        _ => r"\b",
    };
    let trailing = match phrase.chars().last() {
        Some(c) if !is_word_char(c) => r"(?:\W|$)",
        _ => r"\b",
    };

    RegexBuilder::new(&format!("{leading}{}{trailing}", regex::escape(phrase)))
        .case_insensitive(true)
        .build()
        .map_err(|source| TaxonomyError::Pattern {
            skill: phrase.to_string(),
            source,
        })
}
