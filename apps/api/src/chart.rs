//! ATS score pie chart rendered as standalone SVG.

use std::f64::consts::PI;

const MATCH_COLOR: &str = "#00C9A7";
const MISSING_COLOR: &str = "#F67280";
const WIDTH: u32 = 360;
const HEIGHT: u32 = 360;
const CX: f64 = 180.0;
const CY: f64 = 190.0;
const RADIUS: f64 = 120.0;

/// Renders a two-slice pie (match vs missing) for `score`, clamped to 0 – 100.
/// The match slice starts at 12 o'clock and runs clockwise.
pub fn render_score_pie(score: u8) -> String {
    let score = score.min(100);
    let missing = 100 - score;

    let slices = match score {
        0 => full_circle(MISSING_COLOR),
        100 => full_circle(MATCH_COLOR),
        _ => {
            let sweep = f64::from(score) / 100.0 * 2.0 * PI;
            format!(
                "{}\n  {}",
                wedge(0.0, sweep, MATCH_COLOR),
                wedge(sweep, 2.0 * PI, MISSING_COLOR)
            )
        }
    };

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">
  <title>ATS Match Score</title>
  <text x="{CX}" y="32" text-anchor="middle" font-family="sans-serif" font-size="18">ATS Match Score</text>
  {slices}
  <rect x="20" y="326" width="12" height="12" fill="{MATCH_COLOR}"/>
  <text x="38" y="337" font-family="sans-serif" font-size="13">Match ({score}%)</text>
  <rect x="190" y="326" width="12" height="12" fill="{MISSING_COLOR}"/>
  <text x="208" y="337" font-family="sans-serif" font-size="13">Missing ({missing}%)</text>
</svg>
"##
    )
}

fn full_circle(color: &str) -> String {
    format!(r#"<circle cx="{CX}" cy="{CY}" r="{RADIUS}" fill="{color}"/>"#)
}

/// Angles are radians measured clockwise from 12 o'clock.
fn wedge(start: f64, end: f64, color: &str) -> String {
    let (x0, y0) = point_at(start);
    let (x1, y1) = point_at(end);
    let large_arc = u8::from(end - start > PI);
    format!(
        r#"<path d="M {CX} {CY} L {x0:.2} {y0:.2} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{color}"/>"#
    )
}

fn point_at(angle: f64) -> (f64, f64) {
    (CX + RADIUS * angle.sin(), CY - RADIUS * angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_and_missing() {
        let svg = render_score_pie(35);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Match (35%)"));
        assert!(svg.contains("Missing (65%)"));
        assert!(svg.contains("ATS Match Score"));
    }

    #[test]
    fn test_partial_score_draws_two_wedges() {
        let svg = render_score_pie(50);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains(MATCH_COLOR));
        assert!(svg.contains(MISSING_COLOR));
    }

    #[test]
    fn test_large_arc_flag_above_half() {
        let svg = render_score_pie(75);
        let match_fill = format!("fill=\"{MATCH_COLOR}\"/>");
        let match_wedge = svg
            .lines()
            .find(|l| l.contains("<path") && l.contains(&match_fill))
            .unwrap();
        assert!(match_wedge.contains(" 0 1 1 "));
    }

    #[test]
    fn test_extremes_draw_full_circle() {
        let zero = render_score_pie(0);
        assert!(zero.contains("<circle"));
        assert!(!zero.contains("<path"));
        assert!(zero.contains("Missing (100%)"));

        let full = render_score_pie(100);
        assert!(full.contains(&format!(r#"r="{RADIUS}" fill="{MATCH_COLOR}""#)));
    }

    #[test]
    fn test_clamps_out_of_range() {
        let svg = render_score_pie(250);
        assert!(svg.contains("Match (100%)"));
        assert!(svg.contains("Missing (0%)"));
    }
}
