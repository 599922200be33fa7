//! Pass runner.
//!
//! This module is the operational core of the engine:
//!
//! - Fold the input and scan it for coarse triggers (see `trigger.rs`).
//! - Select the passes whose bucket requirements the input satisfies.
//! - Run each selected pass over the folded text into one `RuleDraft`.
//! - Finish the draft into an immutable `RestrictionRule`.
//!
//! ## Pass structure
//!
//! ```text
//! (0) fold + trigger scan  -> TriggerMask
//! (1) every active pass    -> writes its own RuleDraft fields
//! (2) finish               -> RestrictionRule
//! ```
//!
//! Passes never see each other's output, so the result does not depend on
//! the order they are registered in. Skipped passes leave their fields
//! empty, which the evaluator reads as "no constraint".

use super::metrics::{PassMetrics, RunMetrics, RunResult};
use super::trigger::{TriggerInfo, fold};
use crate::{Pass, RestrictionRule, RuleDraft};
use std::time::{Duration, Instant};

/// Parser applies `Pass`es to one description.
///
/// Usage: create with `Parser::new(input, &passes)` then call `run()`.
#[derive(Debug)]
pub struct Parser<'a> {
    /// Untouched description, kept on the rule for diagnostics.
    input: &'a str,
    /// Uppercased, accent-free copy every pass matches against.
    folded: String,
    trigger: TriggerInfo,
    passes: &'a [Pass],
    scan_duration: Duration,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, passes: &'a [Pass]) -> Self {
        let scan_start = Instant::now();
        let folded = fold(input);
        let trigger = TriggerInfo::scan(&folded);
        let scan_duration = scan_start.elapsed();

        log::debug!("[trigger_scan] input={:?} buckets={:?}", input, trigger.mask);

        Parser { input, folded, trigger, passes, scan_duration }
    }

    fn is_active(&self, pass: &Pass) -> bool {
        self.trigger.mask.contains(pass.buckets)
    }

    pub(crate) fn active_pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().filter(|p| self.is_active(p)).map(|p| p.name).collect()
    }

    /// Run all active passes and return the finished rule with per-pass metrics.
    pub fn run_with_metrics(self) -> RunResult {
        let start = Instant::now();
        let mut draft = RuleDraft::new(self.input);
        let mut passes = Vec::with_capacity(self.passes.len());

        for pass in self.passes {
            let pass_start = Instant::now();
            let active = self.is_active(pass);
            let matches = if active { (pass.run)(&self.folded, &mut draft) } else { 0 };

            if active {
                log::trace!("[pass] name=\"{}\" matches={}", pass.name, matches);
            }

            passes.push(PassMetrics { name: pass.name, active, matches, duration: pass_start.elapsed() });
        }

        let rule = draft.finish();
        log::debug!("[parsed] kind={:?} input={:?}", rule.kind(), self.input);

        RunResult {
            rule,
            metrics: RunMetrics {
                total: start.elapsed() + self.scan_duration,
                scan: self.scan_duration,
                trigger: self.trigger.mask,
                passes,
            },
        }
    }

    /// Run all active passes and return the finished rule.
    pub fn run(self) -> RestrictionRule {
        let mut draft = RuleDraft::new(self.input);
        for pass in self.passes.iter().filter(|p| self.is_active(p)) {
            let matches = (pass.run)(&self.folded, &mut draft);
            log::trace!("[pass] name=\"{}\" matches={}", pass.name, matches);
        }
        draft.finish()
    }
}
