//! Extraction passes, one concern per module.
//!
//! Every pass matches against the folded description (uppercase, no
//! accents; see `engine::fold`) and writes only its own draft fields.

mod dates;
mod days;
mod markers;
mod special;
mod times;


use crate::Pass;

/// The default pass set, in the order diagnostics list them.
pub(crate) fn all() -> Vec<Pass> {
    vec![
        markers::restriction_kind(),
        markers::always_restricted(),
        times::time_windows(),
        days::weekdays(),
        dates::date_ranges(),
        special::special_use(),
    ]
}
