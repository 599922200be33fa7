use crate::engine;
use crate::{Pass, RestrictionRule};
use once_cell::sync::Lazy;
use std::time::Duration;
use thiserror::Error;

static DEFAULT_PASSES: Lazy<Vec<Pass>> = Lazy::new(crate::rules::all);

/// Tunables for the geometry side of the engine.
///
/// Parsing and evaluation take no options; their behavior is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Total arc-length of the interval emitted for an "up" arrow, in
    /// coordinate units. Half of it extends on each side of the anchor.
    pub interval_length: f64,
    /// Half-width of the fallback interval for an unspecified direction.
    pub fallback_offset: f64,
    /// Radius handed to the street lookup, in meters.
    pub search_radius_m: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self { interval_length: 50.0, fallback_offset: 0.0001, search_radius_m: 100.0 }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative number, got '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{key} is not valid unicode")]
    NotUnicode { key: &'static str },
}

impl Options {
    /// Defaults, overridden by `CURBSIDE_INTERVAL_LENGTH`,
    /// `CURBSIDE_FALLBACK_OFFSET` and `CURBSIDE_SEARCH_RADIUS_M` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Result<String, std::env::VarError>) -> Result<Self, ConfigError> {
        let mut options = Options::default();
        if let Some(v) = read_number(&lookup, "CURBSIDE_INTERVAL_LENGTH")? {
            options.interval_length = v;
        }
        if let Some(v) = read_number(&lookup, "CURBSIDE_FALLBACK_OFFSET")? {
            options.fallback_offset = v;
        }
        if let Some(v) = read_number(&lookup, "CURBSIDE_SEARCH_RADIUS_M")? {
            options.search_radius_m = v;
        }
        Ok(options)
    }
}

fn read_number(
    lookup: &impl Fn(&str) -> Result<String, std::env::VarError>,
    key: &'static str,
) -> Result<Option<f64>, ConfigError> {
    let raw = match lookup(key) {
        Ok(raw) => raw,
        Err(std::env::VarError::NotPresent) => return Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => return Err(ConfigError::NotUnicode { key }),
    };
    let parsed = raw.trim().parse::<f64>();
    match parsed {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}

/// Compact per-pass trace.
#[derive(Debug, Clone)]
pub struct PassSummary {
    pub name: String,
    /// False when the trigger scan ruled the pass out.
    pub active: bool,
    pub matches: usize,
    pub duration: Duration,
}

/// Additional details returned by [`parse_verbose`].
///
/// Meant for debugging rules and spotting descriptions the passes miss.
#[derive(Debug, Clone)]
pub struct ParseDetails {
    pub total: Duration,
    /// Time spent folding and scanning the input.
    pub scan: Duration,
    /// Trigger buckets found, formatted for display.
    pub buckets: String,
    pub active_passes: Vec<String>,
    pub passes: Vec<PassSummary>,
}

#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub rule: RestrictionRule,
    pub details: ParseDetails,
}

/// Parse a sign description into a [`RestrictionRule`].
///
/// Never fails: text with nothing recognizable yields an unrestricted rule
/// with every gate empty.
///
/// # Example
/// ```
/// use curbside::{DaySet, RestrictionKind, parse};
///
/// let rule = parse(r"\P LUN AU VEN 9h00-10h00");
/// assert_eq!(rule.kind(), RestrictionKind::NoParking);
/// assert_eq!(rule.days_of_week(), DaySet::WEEKDAYS);
/// ```
pub fn parse(text: &str) -> RestrictionRule {
    engine::Parser::new(text, &DEFAULT_PASSES).run()
}

/// Parse `text` and return per-pass details alongside the rule.
pub fn parse_verbose(text: &str) -> ParseResultVerbose {
    let parser = engine::Parser::new(text, &DEFAULT_PASSES);
    let active_passes = parser.active_pass_names().into_iter().map(|s| s.to_string()).collect();

    let run = parser.run_with_metrics();

    let details = ParseDetails {
        total: run.metrics.total,
        scan: run.metrics.scan,
        buckets: format!("{:?}", run.metrics.trigger),
        active_passes,
        passes: run
            .metrics
            .passes
            .iter()
            .map(|p| PassSummary { name: p.name.to_string(), active: p.active, matches: p.matches, duration: p.duration })
            .collect(),
    };

    ParseResultVerbose { rule: run.rule, details }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn parse_verbose_matches_parse() {
        let text = r"\P 1 AVRIL AU 1 NOV LUN AU VEN 9h00-18h00";
        let res = parse_verbose(text);

        assert_eq!(res.rule, parse(text));
        assert_eq!(res.details.passes.len(), 6);
        assert!(res.details.scan <= res.details.total);
        assert!(res.details.active_passes.contains(&"date range".to_string()));

        let days = res.details.passes.iter().find(|p| p.name == "weekday").unwrap();
        assert!(days.active);
        assert_eq!(days.matches, 3);
    }

    #[test]
    fn parse_verbose_reports_skipped_passes() {
        let res = parse_verbose("STATIONNEMENT");
        let skipped: Vec<&str> = res.details.passes.iter().filter(|p| !p.active).map(|p| p.name.as_str()).collect();
        assert_eq!(skipped, vec!["time window", "weekday", "date range"]);
    }

    #[test]
    fn options_default_without_env() {
        let options = Options::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn options_env_overrides() {
        let options = Options::from_lookup(lookup_from(&[
            ("CURBSIDE_INTERVAL_LENGTH", "0.0005"),
            ("CURBSIDE_SEARCH_RADIUS_M", " 250 "),
        ]))
        .unwrap();
        assert_eq!(options.interval_length, 0.0005);
        assert_eq!(options.search_radius_m, 250.0);
        assert_eq!(options.fallback_offset, Options::default().fallback_offset);
    }

    #[test]
    fn options_reject_bad_values() {
        let err = Options::from_lookup(lookup_from(&[("CURBSIDE_FALLBACK_OFFSET", "tiny")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid { key: "CURBSIDE_FALLBACK_OFFSET", value: "tiny".to_string() });

        let err = Options::from_lookup(lookup_from(&[("CURBSIDE_INTERVAL_LENGTH", "-3")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CURBSIDE_INTERVAL_LENGTH", .. }));
    }
}
