use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// What a sign forbids (or charges for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestrictionKind {
    /// `\P` marker: no parking.
    NoParking,
    /// `\A` marker: no stopping.
    NoStopping,
    /// Parking meter or `P <duration>` signature.
    Paid,
    Unrestricted,
}

impl RestrictionKind {
    /// Only no-parking and no-stopping signs block parking; paid signs are informational.
    pub fn is_restricted(self) -> bool {
        matches!(self, RestrictionKind::NoParking | RestrictionKind::NoStopping)
    }

    /// Short code used on the municipal sign catalogue (`P`, `A`, `$`).
    pub fn code(self) -> &'static str {
        match self {
            RestrictionKind::NoParking => "P",
            RestrictionKind::NoStopping => "A",
            RestrictionKind::Paid => "$",
            RestrictionKind::Unrestricted => "-",
        }
    }
}

bitflags::bitflags! {
    /// Set of weekdays a restriction applies on. Empty means every day.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DaySet: u8 {
        const MONDAY    = 1 << 0;
        const TUESDAY   = 1 << 1;
        const WEDNESDAY = 1 << 2;
        const THURSDAY  = 1 << 3;
        const FRIDAY    = 1 << 4;
        const SATURDAY  = 1 << 5;
        const SUNDAY    = 1 << 6;

        const WEEKDAYS = Self::MONDAY.bits()
            | Self::TUESDAY.bits()
            | Self::WEDNESDAY.bits()
            | Self::THURSDAY.bits()
            | Self::FRIDAY.bits();
    }
}

impl DaySet {
    pub fn from_weekday(day: Weekday) -> Self {
        DaySet::from_bits_truncate(1 << day.num_days_from_monday())
    }

    pub fn has(self, day: Weekday) -> bool {
        self.contains(DaySet::from_weekday(day))
    }

    /// Inclusive run of days from `start` to `end`, wrapping past Sunday.
    ///
    /// ```text
    /// span(Mon, Fri) = Mon Tue Wed Thu Fri
    /// span(Sat, Mon) = Sat Sun Mon
    /// ```
    pub fn span(start: Weekday, end: Weekday) -> Self {
        let mut set = DaySet::from_weekday(start);
        let mut day = start;
        while day != end {
            day = day.succ();
            set |= DaySet::from_weekday(day);
        }
        set
    }

    /// Members in Monday-first order.
    pub fn weekdays(self) -> Vec<Weekday> {
        const ORDER: [Weekday; 7] =
            [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun];
        ORDER.into_iter().filter(|d| self.has(*d)).collect()
    }
}

/// Time-of-day window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Yearless calendar range, both ends inclusive.
///
/// A range whose start month is after its end month spans the new year
/// (e.g. 1 December to 1 April).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start_day: u32,
    pub start_month: u32,
    pub end_day: u32,
    pub end_month: u32,
}

impl DateRange {
    pub fn new(start_day: u32, start_month: u32, end_day: u32, end_month: u32) -> Self {
        Self { start_day, start_month, end_day, end_month }
    }

    pub fn wraps_year(&self) -> bool {
        self.start_month > self.end_month
    }

    pub fn contains(&self, month: u32, day: u32) -> bool {
        let after_start = month > self.start_month || (month == self.start_month && day >= self.start_day);
        let before_end = month < self.end_month || (month == self.end_month && day <= self.end_day);

        if self.wraps_year() { after_start || before_end } else { after_start && before_end }
    }
}

/// Reserved-use category printed on a sign. Carried for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialTag {
    Reserved,
    Disabled,
    Taxi,
    Delivery,
    Bus,
    DropOff,
    ResidentPermit,
    Motorcycles,
    Diplomatic,
    FireService,
    CityVehicles,
    MilitaryVehicles,
}

impl SpecialTag {
    /// Keyword table in priority order; the first keyword found in a description wins.
    pub const PRIORITY: [(&'static str, SpecialTag); 12] = [
        ("RESERVE", SpecialTag::Reserved),
        ("HANDICAP", SpecialTag::Disabled),
        ("TAXI", SpecialTag::Taxi),
        ("LIVRAISON", SpecialTag::Delivery),
        ("AUTOBUS", SpecialTag::Bus),
        ("DEBARCADERE", SpecialTag::DropOff),
        ("S3R", SpecialTag::ResidentPermit),
        ("MOTOS", SpecialTag::Motorcycles),
        ("CORPS DIPLOMATIQUES", SpecialTag::Diplomatic),
        ("SERVICE D'INCENDIE", SpecialTag::FireService),
        ("VEHICULES DE LA VILLE", SpecialTag::CityVehicles),
        ("VEHICULES MILITAIRES", SpecialTag::MilitaryVehicles),
    ];

    pub fn keyword(self) -> &'static str {
        SpecialTag::PRIORITY.iter().find(|(_, tag)| *tag == self).map(|(kw, _)| *kw).unwrap_or("")
    }
}

/// Structured meaning of one sign description.
///
/// Built once by [`crate::parse`] and never mutated. The three gates
/// (`days_of_week`, `time_windows`, `date_ranges`) are combined by
/// conjunction; an empty gate always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionRule {
    kind: RestrictionKind,
    always_restricted: bool,
    time_windows: Vec<TimeWindow>,
    days_of_week: DaySet,
    date_ranges: Vec<DateRange>,
    special_tag: Option<SpecialTag>,
    raw_text: String,
}

impl RestrictionRule {
    /// Rule with no recognized constraint.
    pub fn unrestricted(raw_text: impl Into<String>) -> Self {
        RuleDraft::new(raw_text).finish()
    }

    pub fn kind(&self) -> RestrictionKind {
        self.kind
    }

    pub fn is_restricted(&self) -> bool {
        self.kind.is_restricted()
    }

    pub fn always_restricted(&self) -> bool {
        self.always_restricted
    }

    pub fn time_windows(&self) -> &[TimeWindow] {
        &self.time_windows
    }

    pub fn days_of_week(&self) -> DaySet {
        self.days_of_week
    }

    pub fn date_ranges(&self) -> &[DateRange] {
        &self.date_ranges
    }

    pub fn special_tag(&self) -> Option<SpecialTag> {
        self.special_tag
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

/// Mutable accumulator the extraction passes write into.
///
/// Each pass owns its own fields, so the order passes run in does not
/// change the finished rule.
#[derive(Debug, Clone)]
pub struct RuleDraft {
    pub kind: Option<RestrictionKind>,
    pub always_restricted: bool,
    pub time_windows: Vec<TimeWindow>,
    /// Days named individually ("LUN", "MERCREDI").
    pub single_days: DaySet,
    /// Days produced by a range phrase ("LUN AU VEN"). Replaces `single_days` when set.
    pub day_range: Option<DaySet>,
    pub date_ranges: Vec<DateRange>,
    pub special_tag: Option<SpecialTag>,
    pub raw_text: String,
}

impl RuleDraft {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            kind: None,
            always_restricted: false,
            time_windows: Vec::new(),
            single_days: DaySet::empty(),
            day_range: None,
            date_ranges: Vec::new(),
            special_tag: None,
            raw_text: raw_text.into(),
        }
    }

    pub fn finish(self) -> RestrictionRule {
        RestrictionRule {
            kind: self.kind.unwrap_or(RestrictionKind::Unrestricted),
            always_restricted: self.always_restricted,
            time_windows: self.time_windows,
            days_of_week: self.day_range.unwrap_or(self.single_days),
            date_ranges: self.date_ranges,
            special_tag: self.special_tag,
            raw_text: self.raw_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_span_wraps_past_sunday() {
        let set = DaySet::span(Weekday::Sat, Weekday::Mon);
        assert_eq!(set, DaySet::SATURDAY | DaySet::SUNDAY | DaySet::MONDAY);
        assert_eq!(DaySet::span(Weekday::Mon, Weekday::Fri), DaySet::WEEKDAYS);
        assert_eq!(DaySet::span(Weekday::Wed, Weekday::Wed), DaySet::WEDNESDAY);
    }

    #[test]
    fn weekdays_are_monday_first() {
        let set = DaySet::SUNDAY | DaySet::MONDAY | DaySet::THURSDAY;
        assert_eq!(set.weekdays(), vec![Weekday::Mon, Weekday::Thu, Weekday::Sun]);
    }

    #[test]
    fn time_window_is_inclusive() {
        let w = TimeWindow::new(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        assert!(w.contains(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(w.contains(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        assert!(!w.contains(NaiveTime::from_hms_opt(10, 0, 1).unwrap()));
        assert!(!w.contains(NaiveTime::from_hms_opt(8, 59, 59).unwrap()));
    }

    #[test]
    fn plain_date_range_needs_both_bounds() {
        let r = DateRange::new(1, 4, 1, 11);
        assert!(!r.wraps_year());
        assert!(r.contains(4, 1));
        assert!(r.contains(11, 1));
        assert!(r.contains(7, 15));
        assert!(!r.contains(3, 31));
        assert!(!r.contains(11, 2));
    }

    #[test]
    fn wrapping_date_range_needs_either_bound() {
        let r = DateRange::new(1, 12, 1, 4);
        assert!(r.wraps_year());
        // on-or-after the start
        assert!(r.contains(12, 1));
        assert!(r.contains(12, 31));
        // on-or-before the end
        assert!(r.contains(1, 15));
        assert!(r.contains(4, 1));
        // excluded middle of the year
        assert!(!r.contains(4, 2));
        assert!(!r.contains(7, 1));
        assert!(!r.contains(11, 30));
    }

    #[test]
    fn draft_range_replaces_single_days() {
        let mut draft = RuleDraft::new("x");
        draft.single_days = DaySet::SATURDAY;
        draft.day_range = Some(DaySet::WEEKDAYS);
        assert_eq!(draft.finish().days_of_week(), DaySet::WEEKDAYS);
    }

    #[test]
    fn special_tag_keywords_round_trip_through_table() {
        for (keyword, tag) in SpecialTag::PRIORITY {
            assert_eq!(tag.keyword(), keyword);
        }
    }
}
