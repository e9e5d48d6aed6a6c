//! Report Composer: turns the ATS score and role matches into a recommendation message.

use serde::{Deserialize, Serialize};

use crate::scoring::role_matcher::RoleMatch;

/// Scores at or above this are a strong match.
pub const DEFAULT_STRONG_MATCH_THRESHOLD: u8 = 60;
const MAX_ALSO_CONSIDER: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Low,
    Strong,
}

/// Structured recommendation; `message` is the rendered markdown text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: MatchTier,
    pub best_fit: Option<RoleMatch>,
    pub also_consider: Vec<RoleMatch>,
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportComposer {
    pub strong_match_threshold: u8,
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self {
            strong_match_threshold: DEFAULT_STRONG_MATCH_THRESHOLD,
        }
    }
}

impl ReportComposer {
    pub fn new(strong_match_threshold: u8) -> Self {
        Self {
            strong_match_threshold,
        }
    }

    /// A strong score with no matched role has no best fit to name, so it gets the low wording.
    pub fn recommend(&self, ats_score: u8, role_matches: &[RoleMatch]) -> Recommendation {
        let chosen = if ats_score >= self.strong_match_threshold {
            best_fit(role_matches)
        } else {
            None
        };

        let Some(best) = chosen else {
            return Recommendation {
                tier: MatchTier::Low,
                best_fit: None,
                also_consider: vec![],
                message: low_match_message(ats_score),
            };
        };

        let also_consider: Vec<RoleMatch> = role_matches
            .iter()
            .filter(|r| r.role != best.role)
            .take(MAX_ALSO_CONSIDER)
            .cloned()
            .collect();

        let message = strong_match_message(ats_score, best, &also_consider);
        Recommendation {
            tier: MatchTier::Strong,
            best_fit: Some(best.clone()),
            also_consider,
            message,
        }
    }
}

/// Composes the recommendation message using the default strong-match threshold.
/// The HTTP pipeline goes through a configured [`ReportComposer`] instead.
pub fn compose_report(ats_score: u8, role_matches: &[RoleMatch]) -> String {
    ReportComposer::default()
        .recommend(ats_score, role_matches)
        .message
}

/// Highest-scoring role; the earliest one wins ties.
fn best_fit(role_matches: &[RoleMatch]) -> Option<&RoleMatch> {
    role_matches.iter().fold(None, |best, candidate| match best {
        Some(b) if b.score >= candidate.score => Some(b),
        _ => Some(candidate),
    })
}

fn low_match_message(ats_score: u8) -> String {
    format!(
        "Your ATS score is *{ats_score}%*, which is a bit low.\n\n\
         To improve your chances, try refining your resume to highlight more relevant skills."
    )
}

fn strong_match_message(ats_score: u8, best: &RoleMatch, others: &[RoleMatch]) -> String {
    let mut message = format!(
        "Your ATS score is *{ats_score}%* — you're a strong match!\n\n\
         You're well-suited for the *{}* role ({}%).",
        best.role, best.score
    );

    if !others.is_empty() {
        message.push_str("\n\nYou might also explore roles like:\n");
        for other in others {
            message.push_str(&format!("- *{}* ({}%)\n", other.role, other.score));
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str, score: u8) -> RoleMatch {
        RoleMatch {
            role: name.to_string(),
            matched: vec!["python".to_string()],
            missing: vec![],
            score,
        }
    }

    #[test]
    fn test_low_score_message() {
        let msg = compose_report(35, &[role("Data Analyst", 40)]);
        assert!(msg.contains("*35%*"));
        assert!(msg.contains("a bit low"));
        assert!(!msg.contains("Data Analyst"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let roles = vec![role("Cloud Engineer", 75)];
        assert!(compose_report(59, &roles).contains("a bit low"));
        assert!(compose_report(60, &roles).contains("strong match"));
    }

    #[test]
    fn test_strong_names_best_fit() {
        let roles = vec![
            role("AI/ML Intern", 60),
            role("Backend Developer", 100),
            role("Data Analyst", 80),
        ];
        let rec = ReportComposer::default().recommend(85, &roles);
        assert_eq!(rec.tier, MatchTier::Strong);
        assert_eq!(rec.best_fit.as_ref().unwrap().role, "Backend Developer");
        assert!(rec.message.contains("*Backend Developer* role (100%)"));
    }

    #[test]
    fn test_best_fit_tie_goes_to_first() {
        let roles = vec![role("Web Developer", 80), role("Cloud Engineer", 80)];
        let rec = ReportComposer::default().recommend(70, &roles);
        assert_eq!(rec.best_fit.unwrap().role, "Web Developer");
    }

    #[test]
    fn test_also_consider_capped_at_two_in_order() {
        let roles = vec![
            role("AI/ML Intern", 40),
            role("Data Analyst", 60),
            role("Web Developer", 100),
            role("Backend Developer", 50),
        ];
        let rec = ReportComposer::default().recommend(90, &roles);
        let names: Vec<&str> = rec.also_consider.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(names, vec!["AI/ML Intern", "Data Analyst"]);
        assert!(rec.message.contains("- *AI/ML Intern* (40%)"));
        assert!(rec.message.contains("- *Data Analyst* (60%)"));
        assert!(!rec.message.contains("Backend Developer"));
    }

    #[test]
    fn test_single_role_has_no_also_consider_section() {
        let rec = ReportComposer::default().recommend(100, &[role("Cloud Engineer", 100)]);
        assert!(rec.also_consider.is_empty());
        assert!(!rec.message.contains("might also explore"));
    }

    #[test]
    fn test_strong_score_without_roles_falls_back_to_low_wording() {
        let rec = ReportComposer::default().recommend(80, &[]);
        assert_eq!(rec.tier, MatchTier::Low);
        assert!(rec.best_fit.is_none());
        assert!(rec.message.contains("*80%*"));
        assert!(rec.message.contains("a bit low"));
    }

    #[test]
    fn test_custom_threshold() {
        let composer = ReportComposer::new(30);
        let rec = composer.recommend(30, &[role("Data Analyst", 40)]);
        assert_eq!(rec.tier, MatchTier::Strong);
    }
}
