// Scoring core: skill extraction, role matching, report composition.
// Everything here is pure and synchronous; the taxonomy is always passed in.

pub mod jd_keywords;
pub mod report;
pub mod role_matcher;
pub mod skill_extractor;

/// Truncating integer percentage, `floor(100 * part / whole)`. Zero when `whole` is zero.
pub fn truncated_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part.min(whole) * 100) / whole) as u8
}
