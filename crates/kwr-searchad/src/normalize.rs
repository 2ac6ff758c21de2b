//! Normalization of raw keyword tool rows into [`KeywordRecord`]s.
//!
//! Every parser here degrades instead of failing: unknown counts become `0`
//! and unknown scores become `None`.

use kwr_core::KeywordRecord;
use serde_json::Value;

use crate::types::RawKeyword;

pub const COMPETITION_LOW: f64 = 0.3;
pub const COMPETITION_MID: f64 = 0.6;
pub const COMPETITION_HIGH: f64 = 0.9;

const LOW_LABELS: &[&str] = &["낮음", "하", "low"];
const MID_LABELS: &[&str] = &["중간", "중", "mid", "medium"];
const HIGH_LABELS: &[&str] = &["높음", "상", "high"];

/// Parses a count, stripping the API's `<` ceiling marker. Returns `0` when
/// the value is absent or not an integer.
#[must_use]
pub fn to_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(truncate))
            .unwrap_or(0),
        Some(Value::String(s)) => s.replace('<', "").trim().parse::<i64>().unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

/// Parses a floating-point value. Returns `None` when absent or unparseable.
#[must_use]
pub fn to_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Maps a competition label to a coarse score (`0.3` / `0.6` / `0.9`),
/// falling back to a direct numeric parse.
#[must_use]
pub fn parse_competition(value: Option<&Value>) -> Option<f64> {
    let text = label_text(value?)?;
    let text = text.trim();
    let lowered = text.to_lowercase();

    if LOW_LABELS.contains(&lowered.as_str()) {
        return Some(COMPETITION_LOW);
    }
    if MID_LABELS.contains(&lowered.as_str()) {
        return Some(COMPETITION_MID);
    }
    if HIGH_LABELS.contains(&lowered.as_str()) {
        return Some(COMPETITION_HIGH);
    }
    text.parse::<f64>().ok()
}

/// Converts one raw row into a record tagged with its base keyword.
///
/// Rows without related-keyword text yield `None`.
#[must_use]
pub fn normalize_keyword(raw: &RawKeyword, source_keyword: &str) -> Option<KeywordRecord> {
    let keyword = raw.rel_keyword.as_deref().filter(|k| !k.is_empty())?;

    let pc = to_int(raw.monthly_pc_qc_cnt.as_ref());
    let mobile = to_int(raw.monthly_mobile_qc_cnt.as_ref());
    let score = parse_competition(raw.comp_idx.as_ref());
    let label = raw.comp_idx.as_ref().and_then(label_text);

    Some(
        KeywordRecord::new(keyword, pc, mobile, source_keyword)
            .with_competition(score, label)
            .with_avg_ad_depth(to_float(raw.pl_avg_depth.as_ref())),
    )
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}
