//! Availability evaluation.
//!
//! A rule blocks parking at an instant when it is a blocking kind
//! (no parking / no stopping) and all three of its gates hold:
//!
//! ```text
//! day_gate  : days_of_week empty  OR weekday(at) in days_of_week
//! time_gate : time_windows empty  OR some window contains time(at)
//! date_gate : date_ranges empty   OR some range contains (month, day)(at)
//!
//! allowed = !always_restricted && !(is_restricted && day && time && date)
//! ```
//!
//! Paid rules are never blocking: payment is a separate fact carried in
//! [`RestrictionKind`](crate::RestrictionKind).

use crate::RestrictionRule;
use chrono::{Datelike, Local, NaiveDateTime, NaiveTime, Weekday};

impl RestrictionRule {
    /// True when the rule's day, time and date gates all hold at `at`.
    ///
    /// This ignores the rule kind; see [`is_allowed`] for the parking decision.
    pub fn restriction_applies(&self, at: NaiveDateTime) -> bool {
        self.day_gate(at.weekday()) && self.time_gate(at.time()) && self.date_gate(at.month(), at.day())
    }

    fn day_gate(&self, weekday: Weekday) -> bool {
        self.days_of_week().is_empty() || self.days_of_week().has(weekday)
    }

    fn time_gate(&self, time: NaiveTime) -> bool {
        self.time_windows().is_empty() || self.time_windows().iter().any(|w| w.contains(time))
    }

    fn date_gate(&self, month: u32, day: u32) -> bool {
        self.date_ranges().is_empty() || self.date_ranges().iter().any(|r| r.contains(month, day))
    }
}

/// Whether parking is allowed under `rule` at the wall-clock instant `at`.
pub fn is_allowed(rule: &RestrictionRule, at: NaiveDateTime) -> bool {
    if rule.always_restricted() {
        return false;
    }
    !(rule.is_restricted() && rule.restriction_applies(at))
}

/// [`is_allowed`] evaluated against the local clock.
pub fn is_allowed_now(rule: &RestrictionRule) -> bool {
    is_allowed(rule, Local::now().naive_local())
}
