//! Payload Normalizer
//!
//! Converts any raw scenario/task record into the canonical [`Scenario`],
//! whichever producer it came from:
//!
//! - persisted task rows (`target_market`, `created_at`, `ai_analysis`)
//! - client drafts and analysis results (`targetMarket`, `createdAt`, `aiAnalysis`)
//! - legacy mock records (flat `feasibility`/`impact`/`opportunities`)
//!
//! Normalization never fails. Every absent or mistyped field has a default.

pub mod simulation;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::fields;
use crate::model::{Analysis, KeyMetric, Lifecycle, Scenario, UserStory};
use crate::record::RawRecord;

pub use simulation::{analysis_from_simulation, is_simulation_response};

static FALLBACK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Normalize one tagged record.
pub fn normalize(raw: &RawRecord) -> Scenario {
    let payload = &raw.payload;
    Scenario {
        id: fields::id_string(payload.get("id")).unwrap_or_else(fallback_id),
        name: fields::string_or_empty(payload.get("name")),
        description: fields::string_or_empty(payload.get("description")),
        target_market: fields::string_or_empty(raw.field("target_market", "targetMarket")),
        timeline: fields::string_or_empty(payload.get("timeline")),
        resources: fields::non_empty(payload.get("resources")),
        assumptions: fields::string_list(payload.get("assumptions")),
        created_at: parse_timestamp(raw.field("created_at", "createdAt")).unwrap_or_else(Utc::now),
        analysis: normalize_analysis(raw.field("ai_analysis", "aiAnalysis")),
    }
}

/// Normalize a payload whose origin has to be detected.
pub fn normalize_value(payload: Value) -> Scenario {
    normalize(&RawRecord::detect(payload))
}

/// Normalize a batch, preserving order.
pub fn normalize_all<'a>(records: impl IntoIterator<Item = &'a RawRecord>) -> Vec<Scenario> {
    records.into_iter().map(normalize).collect()
}

/// Unify the three analysis shapes (lifecycle response, flat legacy, absent).
///
/// Persisted rows sometimes carry the analysis as a JSON-encoded string;
/// it is decoded first.
pub fn normalize_analysis(value: Option<&Value>) -> Analysis {
    let decoded;
    let payload = match value {
        Some(Value::String(text)) => {
            decoded = serde_json::from_str::<Value>(text).ok();
            decoded.as_ref()
        }
        other => other,
    };

    match payload {
        Some(v) if v.is_object() && is_simulation_response(v) => analysis_from_simulation(v),
        Some(v) if v.is_object() => flat_analysis(v),
        _ => Analysis::default(),
    }
}

/// Client-generated id for records that never had one.
pub fn fallback_id() -> String {
    let seq = FALLBACK_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", Utc::now().timestamp_millis(), seq)
}

fn flat_analysis(v: &Value) -> Analysis {
    let lifecycle = v.get("lifecycle").and_then(Lifecycle::from_value);
    let lead_feature = lifecycle
        .as_ref()
        .and_then(|l| l.feature_scores().into_iter().next());

    let impact = fields::score(v.get("impact"))
        .or_else(|| lead_feature.as_ref().and_then(|f| f.impact_score))
        .unwrap_or(0);
    let impact_rationale = fields::non_empty(v.get("impactRationale"))
        .or_else(|| fields::non_empty_at(v, &["aiReasons", "impact"]))
        .or_else(|| lead_feature.and_then(|f| f.reasoning));

    let opportunities: Vec<String> = fields::array(v.get("opportunities"))
        .iter()
        .filter_map(UserStory::from_value)
        .map(|s| s.story)
        .collect();
    let user_stories = match v.get("userStories").and_then(Value::as_array) {
        Some(items) => items.iter().filter_map(UserStory::from_value).collect(),
        None => opportunities.iter().map(UserStory::from_opportunity).collect(),
    };

    let strategic_framing = fields::non_empty(v.get("strategicFraming"))
        .or_else(|| lifecycle.as_ref().and_then(Lifecycle::strategic_framing));

    Analysis {
        impact,
        impact_rationale,
        feasibility: fields::score(v.get("feasibility")),
        risks: fields::string_list(v.get("risks")),
        opportunities,
        user_stories,
        recommendation: fields::string_or_empty(v.get("recommendation")),
        strategic_framing,
        key_metrics: fields::array(v.get("keyMetrics"))
            .iter()
            .filter_map(KeyMetric::from_value)
            .collect(),
        lifecycle,
    }
}

/// RFC 3339, or naive ISO 8601 read as UTC, or a bare date at midnight UTC.
fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let text = value?.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
