//! Description parsing engine.
//!
//! Parsing a description is a short pipeline:
//!
//! ```text
//! input ── fold (uppercase, strip accents)          (trigger.rs)
//!              │
//!              └─ TriggerInfo::scan ── TriggerMask  (trigger.rs)
//!                                        │
//! passes (all) ──── select active passes ┘          (parser.rs)
//!                       │
//!                       v
//!              run each pass into a RuleDraft       (parser.rs)
//!                       │
//!                       v
//!              RuleDraft::finish ── RestrictionRule
//! ```
//!
//! Unlike a left-to-right tokenizer, every pass scans the whole folded text
//! on its own. Sign descriptions interleave markers, times, days and dates
//! in no fixed order, so each concern is extracted independently and the
//! draft combines them.
//!
//! ## Responsibilities by module
//!
//! - `trigger.rs`: folds the input and computes coarse buckets used to skip
//!   passes that cannot match.
//! - `parser.rs`: runs the active passes and finishes the rule.
//! - `metrics.rs`: optional per-pass timing and match counts.
//!
//! ## Adding a pass
//!
//! Add a constructor under `src/rules/**` built with `pass!` and register it
//! in `rules::all`. If it needs a new coarse trigger, add a `TriggerMask` bit
//! and teach `TriggerInfo::scan` to detect it.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=curbside=trace` to see trigger scans and every match.

#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/trigger.rs"]
mod trigger;

#[allow(unused_imports)]
pub use metrics::{PassMetrics, RunMetrics, RunResult};
pub use parser::Parser;
#[allow(unused_imports)]
pub use trigger::{TriggerInfo, TriggerMask, fold};
