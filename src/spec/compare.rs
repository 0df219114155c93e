//! Positional comparison of two [`ScreenSpec`] values.

use super::types::{ComparisonResult, DiffFinding, GapSpec, PaddingSpec, ScreenSpec, TextSpec};

/// Allowed difference for font sizes and gaps
pub const NUMERIC_TOLERANCE: f64 = 0.0;

/// Equality for optional numbers: two absent values are equal, absent and
/// present never are, two present values must be within `tolerance`.
pub fn nearly_equal(a: Option<f64>, b: Option<f64>, tolerance: f64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() <= tolerance,
        (None, None) => true,
        _ => false,
    }
}

/// Compare `actual` against `expected`.
///
/// Entries are aligned by index. Every expected entry must be present and
/// equal; entries that only exist in `actual` are not reported. Findings are
/// ordered screen name, texts, paddings, gaps, each group by ascending index.
pub fn compare_screen_spec(expected: &ScreenSpec, actual: &ScreenSpec) -> ComparisonResult {
    let mut diffs = Vec::new();

    if expected.screen_name != actual.screen_name {
        diffs.push(DiffFinding::new(format!(
            "screenName expected=\"{}\" actual=\"{}\"",
            expected.screen_name, actual.screen_name
        )));
    }

    compare_texts(&expected.texts, &actual.texts, &mut diffs);
    compare_paddings(&expected.paddings, &actual.paddings, &mut diffs);
    compare_gaps(&expected.gaps, &actual.gaps, &mut diffs);

    ComparisonResult::from_diffs(diffs)
}

fn compare_texts(expected: &[TextSpec], actual: &[TextSpec], diffs: &mut Vec<DiffFinding>) {
    for (idx, exp) in expected.iter().enumerate() {
        let Some(act) = actual.get(idx) else {
            diffs.push(DiffFinding::new(format!("Text #{idx}: missing in actual")));
            continue;
        };

        if exp.text != act.text {
            diffs.push(DiffFinding::new(format!(
                "Text #{idx}: text mismatch expected={} actual={}",
                quoted(exp.text.as_deref()),
                quoted(act.text.as_deref())
            )));
        }
        if !nearly_equal(exp.font_size, act.font_size, NUMERIC_TOLERANCE) {
            diffs.push(DiffFinding::new(format!(
                "Text #{idx} ({}): fontSize expected={} actual={}",
                quoted(exp.text.as_deref()),
                number(exp.font_size),
                number(act.font_size)
            )));
        }
    }
}

fn compare_paddings(expected: &[PaddingSpec], actual: &[PaddingSpec], diffs: &mut Vec<DiffFinding>) {
    for (idx, exp) in expected.iter().enumerate() {
        let Some(act) = actual.get(idx) else {
            diffs.push(DiffFinding::new(format!("Padding #{idx}: missing in actual")));
            continue;
        };

        for ((edge, e), (_, a)) in exp.edges().into_iter().zip(act.edges()) {
            if e != a {
                diffs.push(DiffFinding::new(format!(
                    "Padding #{idx}: {edge} expected={e} actual={a}"
                )));
            }
        }
    }
}

fn compare_gaps(expected: &[GapSpec], actual: &[GapSpec], diffs: &mut Vec<DiffFinding>) {
    for (idx, exp) in expected.iter().enumerate() {
        let Some(act) = actual.get(idx) else {
            diffs.push(DiffFinding::new(format!("Gap #{idx}: missing in actual")));
            continue;
        };

        let fields = [("height", exp.height, act.height), ("width", exp.width, act.width)];
        for (field, e, a) in fields {
            if !nearly_equal(e, a, NUMERIC_TOLERANCE) {
                diffs.push(DiffFinding::new(format!(
                    "Gap #{idx}: {field} expected={} actual={}",
                    number(e),
                    number(a)
                )));
            }
        }
    }
}

fn quoted(text: Option<&str>) -> String {
    match text {
        Some(t) => format!("\"{t}\""),
        None => "null".to_string(),
    }
}

fn number(value: Option<f64>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "null".to_string(),
    }
}
