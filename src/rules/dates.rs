//! Yearless date ranges ("1 AVRIL AU 1 NOV", "1ER DEC. AU 1ER AVRIL").

use crate::DateRange;
use crate::engine::TriggerMask;
use chrono::NaiveDate;

/// French month names and their usual sign abbreviations.
///
/// Bare `MAR` is deliberately absent: on signs it always means Tuesday.
const MONTHS: [(&str, u32); 21] = [
    ("JANVIER", 1),
    ("JANV", 1),
    ("JAN", 1),
    ("FEVRIER", 2),
    ("FEV", 2),
    ("MARS", 3),
    ("AVRIL", 4),
    ("AVR", 4),
    ("MAI", 5),
    ("JUIN", 6),
    ("JUILLET", 7),
    ("JUIL", 7),
    ("AOUT", 8),
    ("SEPTEMBRE", 9),
    ("SEPT", 9),
    ("OCTOBRE", 10),
    ("OCT", 10),
    ("NOVEMBRE", 11),
    ("NOV", 11),
    ("DECEMBRE", 12),
    ("DEC", 12),
];

/// Every `<day> <month> AU <day> <month>` phrase, in text order.
///
/// A match is kept only when both months resolve and both days exist in
/// their month (29 February included). A bad match is dropped on its own;
/// the rest of the description still parses.
pub fn date_ranges() -> crate::Pass {
    pass! {
        name: "date range",
        buckets: TriggerMask::HAS_DIGITS | TriggerMask::MONTHISH,
        run: |text, draft| {
            let re = regex!(
                r"\b(\d{1,2})(?:ER)?\s+(JANVIER|JANV|JAN|FEVRIER|FEV|MARS|AVRIL|AVR|MAI|JUIN|JUILLET|JUIL|AOUT|SEPTEMBRE|SEPT|OCTOBRE|OCT|NOVEMBRE|NOV|DECEMBRE|DEC)\b\.?\s+(?:AU|A|ET)\s+(\d{1,2})(?:ER)?\s+(JANVIER|JANV|JAN|FEVRIER|FEV|MARS|AVRIL|AVR|MAI|JUIN|JUILLET|JUIL|AOUT|SEPTEMBRE|SEPT|OCTOBRE|OCT|NOVEMBRE|NOV|DECEMBRE|DEC)\b"
            );

            let mut found = 0;
            for caps in re.captures_iter(text) {
                match date_range(&caps[1], &caps[2], &caps[3], &caps[4]) {
                    Some(range) => {
                        log::trace!("[date range] {:?} -> {:?}", &caps[0], range);
                        draft.date_ranges.push(range);
                        found += 1;
                    }
                    None => log::trace!("[date range] dropped {:?}", &caps[0]),
                }
            }
            found
        }
    }
}

fn date_range(start_day: &str, start_month: &str, end_day: &str, end_month: &str) -> Option<DateRange> {
    let (start_day, start_month) = month_day(start_day, start_month)?;
    let (end_day, end_month) = month_day(end_day, end_month)?;
    Some(DateRange::new(start_day, start_month, end_day, end_month))
}

fn month_day(day: &str, month: &str) -> Option<(u32, u32)> {
    let month = month_number(month)?;
    let day: u32 = day.parse().ok()?;
    // 2000 is a leap year, so 29 February is accepted.
    NaiveDate::from_ymd_opt(2000, month, day)?;
    Some((day, month))
}

fn month_number(token: &str) -> Option<u32> {
    MONTHS.iter().find(|(name, _)| *name == token).map(|(_, number)| *number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_resolve_exactly() {
        assert_eq!(month_number("MARS"), Some(3));
        assert_eq!(month_number("JUIL"), Some(7));
        assert_eq!(month_number("JUILLET"), Some(7));
        assert_eq!(month_number("DEC"), Some(12));
        assert_eq!(month_number("MAR"), None);
        assert_eq!(month_number("MARCH"), None);
    }

    #[test]
    fn impossible_days_are_rejected() {
        assert_eq!(month_day("29", "FEV"), Some((29, 2)));
        assert_eq!(month_day("30", "FEV"), None);
        assert_eq!(month_day("31", "AVRIL"), None);
        assert_eq!(month_day("0", "MAI"), None);
    }

    #[test]
    fn builds_range() {
        assert_eq!(date_range("1", "DEC", "1", "AVRIL"), Some(DateRange::new(1, 12, 1, 4)));
        assert_eq!(date_range("1", "DEC", "31", "AVR"), None);
    }
}
