//! Engine run metrics.
//!
//! This module defines a small set of structs used to observe and debug the
//! parser.
//!
//! The intended usage is:
//!
//! - `Parser::run` for normal operation.
//! - `Parser::run_with_metrics` for profiling and for seeing which pass
//!   recognized what (the diagnostic CLI prints these).

use super::trigger::TriggerMask;
use crate::RestrictionRule;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Parser::run_with_metrics`](super::Parser::run_with_metrics).
    pub total: Duration,
    /// Time spent folding and scanning the input.
    pub scan: Duration,
    /// Buckets the trigger scan found.
    pub trigger: TriggerMask,
    /// One entry per registered pass, in registration order.
    pub passes: Vec<PassMetrics>,
}

/// Timing and match count for a single pass.
#[derive(Debug, Clone)]
pub struct PassMetrics {
    pub name: &'static str,
    /// False when the trigger scan ruled the pass out.
    pub active: bool,
    /// Number of matches the pass recorded into the draft.
    pub matches: usize,
    pub duration: Duration,
}

/// Parser output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub rule: RestrictionRule,
    pub metrics: RunMetrics,
}
