//! Scenario Studio Core
//!
//! The scenario aggregation core: canonical model, payload normalizer,
//! selection set, ranker, comparator and insight aggregator. This crate has
//! no network or filesystem code; the backend client and the application
//! layer build on top of it.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `model` - Canonical `Scenario` / `Analysis` and their parts
//! - `record` - Origin-tagged raw records (`RawRecord`, `Origin`)
//! - `normalize` - Raw record to canonical scenario, including `/simulate` conversion
//! - `selection` - User-chosen id set (`SelectionSet`)
//! - `ranking` - Stable impact ordering
//! - `comparison` - N-way comparison (`ComparisonOutcome`, `ComparisonResult`)
//! - `insights` - Cross-scenario rollup (`InsightRollup`)
//! - `collection` - Today + day-grouped history with selection resolution
//! - `mutation` - Create/delete lifecycle state machine
//! - `builders` - `ScenarioBuilder` for fixtures and tests
//!
//! ## Design Principles
//!
//! 1. **Normalization never fails** - malformed input degrades to defaults
//! 2. **Raw records enter only through `normalize`** - everything downstream sees `Scenario`
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod builders;
pub mod collection;
pub mod comparison;
pub mod error;
mod fields;
pub mod insights;
pub mod model;
pub mod mutation;
pub mod normalize;
pub mod ranking;
pub mod record;
pub mod selection;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Canonical Model ────────────────────────────────────────────────────
pub use model::{Analysis, FeatureImpactScore, KeyMetric, Lifecycle, Scenario, Trend, UserStory};
pub use record::{Origin, RawRecord};

// ── Normalization ──────────────────────────────────────────────────────
pub use normalize::{normalize, normalize_all, normalize_analysis, normalize_value};

// ── Selection, Ranking, Comparison, Insights ───────────────────────────
pub use comparison::{
    compare, ComparisonCell, ComparisonColumn, ComparisonOutcome, ComparisonResult, ComparisonRow,
    RowKind,
};
pub use insights::{aggregate, InsightRollup, ScenarioRecommendation};
pub use ranking::{rank, rank_refs};
pub use selection::SelectionSet;

// ── Collection & Mutations ─────────────────────────────────────────────
pub use collection::{HistoryGroups, ScenarioCollection};
pub use mutation::{MutationKind, MutationLifecycle, MutationOutcome, MutationPhase};

// ── Builders ───────────────────────────────────────────────────────────
pub use builders::ScenarioBuilder;
