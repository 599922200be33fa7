//! Parking-sign restriction engine.
//!
//! Three pure entry points:
//!
//! - [`parse`]: free-text sign description → [`RestrictionRule`]
//! - [`is_allowed`]: rule + instant → may I park here right now?
//! - [`build_intervals`]: street polyline + sign point + arrow → covered sub-segments
//!
//! Everything else (street lookup, persistence, display) plugs in around these.

extern crate self as curbside;

#[macro_use]
mod macros;
mod api;
mod engine;
mod evaluate;
pub mod geometry;
mod restriction;
mod rules;
mod sign;

pub use api::{ConfigError, Options, ParseDetails, ParseResultVerbose, PassSummary, parse, parse_verbose};
pub use evaluate::{is_allowed, is_allowed_now};
pub use geometry::{
    Direction, GeometryError, StaticStreets, Street, StreetInterval, StreetLookup, build_intervals,
    build_intervals_with, filter_by_distance, haversine_km,
};
pub use restriction::{DateRange, DaySet, RestrictionKind, RestrictionRule, RuleDraft, SpecialTag, TimeWindow};
pub use sign::{Sign, SignReport, analyze_sign};

use crate::engine::TriggerMask;

// --- Internal types ---------------------------------------------------------

pub(crate) type PassFn = fn(&str, &mut RuleDraft) -> usize;

/// One extraction pass over the folded description.
///
/// Passes are independent: each writes only its own fields of the
/// [`RuleDraft`] and returns how many matches it recorded. A pass runs only
/// when the trigger scan found every bucket in `buckets`.
pub(crate) struct Pass {
    pub name: &'static str,
    pub buckets: TriggerMask,
    pub run: PassFn,
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pass").field("name", &self.name).field("buckets", &self.buckets).field("run", &"<function>").finish()
    }
}
