//! Weekday tokens and day-range phrases.
//!
//! Single days ("LUN", "MERCREDI") accumulate into a set. A range phrase
//! ("LUN AU VEN") expands to its enumerated days and replaces that set
//! outright: "LUN AU VEN SAM" means Monday to Friday.

use crate::engine::TriggerMask;
use crate::DaySet;
use chrono::Weekday;

pub fn weekdays() -> crate::Pass {
    pass! {
        name: "weekday",
        buckets: TriggerMask::DAYISH,
        run: |text, draft| {
            let singles = single_days(text);
            let ranges = range_phrases(text);
            log::trace!("[weekday] singles={:?} ranges={:?}", singles, ranges);

            draft.single_days = singles.iter().fold(DaySet::empty(), |set, day| set | DaySet::from_weekday(*day));
            draft.day_range = template_range(text).or_else(|| expand_ranges(&ranges));
            singles.len() + ranges.len()
        }
    }
}

/// A `<day> <connector> <day>` phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RangePhrase {
    start: Weekday,
    end: Weekday,
    /// `ET` ("and") is only read as a range inside the templates.
    conjunction: bool,
}

fn single_days(text: &str) -> Vec<Weekday> {
    regex!(r"\b(LUNDI|LUN|MARDI|MAR|MERCREDI|MER|JEUDI|JEU|VENDREDI|VEN|SAMEDI|SAM|DIMANCHE|DIM)\b")
        .captures_iter(text)
        .filter_map(|caps| weekday_from_token(&caps[1]))
        .collect()
}

fn range_phrases(text: &str) -> Vec<RangePhrase> {
    regex!(
        r"\b(LUNDI|LUN|MARDI|MAR|MERCREDI|MER|JEUDI|JEU|VENDREDI|VEN|SAMEDI|SAM|DIMANCHE|DIM)\b\.?\s+(AU|A|ET)\s+(LUNDI|LUN|MARDI|MAR|MERCREDI|MER|JEUDI|JEU|VENDREDI|VEN|SAMEDI|SAM|DIMANCHE|DIM)\b"
    )
    .captures_iter(text)
    .filter_map(|caps| {
        Some(RangePhrase {
            start: weekday_from_token(&caps[1])?,
            end: weekday_from_token(&caps[3])?,
            conjunction: &caps[2] == "ET",
        })
    })
    .collect()
}

/// Monday-based templates, checked in priority order, each searched on its
/// own so a day shared with a neighbouring phrase still counts. The
/// connector may be `AU`, `A` or `ET`.
///
/// ```text
/// "LUN ET VEN"            -> Mon..Fri
/// "SAM ET LUN AU VEN"     -> Mon..Fri
/// "LUN AU SAM"            -> Mon..Sat
/// ```
fn template_range(text: &str) -> Option<DaySet> {
    if regex!(r"\b(?:LUNDI|LUN)\b\.?\s+(?:AU|A|ET)\s+(?:VENDREDI|VEN)\b").is_match(text) {
        Some(DaySet::span(Weekday::Mon, Weekday::Fri))
    } else if regex!(r"\b(?:LUNDI|LUN)\b\.?\s+(?:AU|A|ET)\s+(?:SAMEDI|SAM)\b").is_match(text) {
        Some(DaySet::span(Weekday::Mon, Weekday::Sat))
    } else if regex!(r"\b(?:LUNDI|LUN)\b\.?\s+(?:AU|A|ET)\s+(?:DIMANCHE|DIM)\b").is_match(text) {
        Some(DaySet::span(Weekday::Mon, Weekday::Sun))
    } else {
        None
    }
}

/// Union of the `AU`/`A` phrases, or `None` when there is none.
///
/// ```text
/// [MAR AU JEU]            -> Tue..Thu
/// [MAR AU MER, VEN A SAM] -> Tue Wed Fri Sat
/// [MAR ET JEU]            -> None       (a list, not a range)
/// ```
fn expand_ranges(ranges: &[RangePhrase]) -> Option<DaySet> {
    ranges.iter().filter(|r| !r.conjunction).map(|r| DaySet::span(r.start, r.end)).reduce(|a, b| a | b)
}

fn weekday_from_token(token: &str) -> Option<Weekday> {
    match token {
        "LUNDI" | "LUN" => Some(Weekday::Mon),
        "MARDI" | "MAR" => Some(Weekday::Tue),
        "MERCREDI" | "MER" => Some(Weekday::Wed),
        "JEUDI" | "JEU" => Some(Weekday::Thu),
        "VENDREDI" | "VEN" => Some(Weekday::Fri),
        "SAMEDI" | "SAM" => Some(Weekday::Sat),
        "DIMANCHE" | "DIM" => Some(Weekday::Sun),
        _ => None,
    }
}
