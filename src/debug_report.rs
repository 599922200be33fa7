use chrono::NaiveDateTime;
use curbside::{Direction, Options, ParseDetails, RestrictionRule, StreetInterval, is_allowed};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, rule: &RestrictionRule, details: &ParseDetails, at: NaiveDateTime, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Passes ━━━", ansi::GRAY));
    println!("  {} {}", palette.dim("buckets:"), palette.paint(&details.buckets, ansi::BLUE));
    print_passes(details, &palette);

    println!("\n{}", palette.paint("━━━ Rule ━━━", ansi::GRAY));
    print_rule(rule, &palette);

    println!("\n{}", palette.paint("━━━ Verdict ━━━", ansi::GRAY));
    let verdict = if is_allowed(rule, at) {
        palette.bold(palette.paint("✓ parking allowed", ansi::GREEN))
    } else {
        palette.bold(palette.paint("✗ parking not allowed", ansi::RED))
    };
    println!("  {} {}  {}", palette.dim("at"), palette.paint(at.format("%a %Y-%m-%d %H:%M").to_string(), ansi::YELLOW), verdict);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Scan: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.dim(format!("{:?}", details.scan)),
    );
    println!();
}

fn print_passes(details: &ParseDetails, palette: &ansi::Palette) {
    for pass in &details.passes {
        let status = if !pass.active {
            palette.dim("– skipped")
        } else if pass.matches > 0 {
            palette.paint(format!("✓ {} matches", pass.matches), ansi::GREEN)
        } else {
            palette.dim("✗ no match")
        };
        println!("  {:<20} {}  {}", palette.paint(&pass.name, ansi::BLUE), status, palette.dim(format!("{:?}", pass.duration)));
    }
}

fn print_rule(rule: &RestrictionRule, palette: &ansi::Palette) {
    let field = |label: &str, value: String| println!("  {:<12} {}", palette.dim(label), value);

    field("kind:", palette.bold(palette.paint(rule.kind().code(), ansi::CYAN)));
    if rule.always_restricted() {
        field("always:", palette.paint("yes", ansi::YELLOW));
    }
    if !rule.time_windows().is_empty() {
        let windows: Vec<String> = rule
            .time_windows()
            .iter()
            .map(|w| format!("{}-{}", w.start.format("%H:%M"), w.end.format("%H:%M")))
            .collect();
        field("times:", palette.paint(windows.join(", "), ansi::YELLOW));
    }
    if !rule.days_of_week().is_empty() {
        let days: Vec<String> = rule.days_of_week().weekdays().iter().map(|d| d.to_string()).collect();
        field("days:", palette.paint(days.join(" "), ansi::YELLOW));
    }
    if !rule.date_ranges().is_empty() {
        let ranges: Vec<String> = rule
            .date_ranges()
            .iter()
            .map(|r| format!("{:02}/{:02}-{:02}/{:02}", r.start_day, r.start_month, r.end_day, r.end_month))
            .collect();
        field("dates:", palette.paint(ranges.join(", "), ansi::YELLOW));
    }
    if let Some(tag) = rule.special_tag() {
        field("special:", palette.paint(tag.keyword(), ansi::BLUE));
    }
}

pub fn print_intervals(intervals: &[StreetInterval], direction: Direction, options: &Options, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("{}", palette.paint("━━━ Intervals ━━━", ansi::GRAY));
    println!(
        "  {} {}  {} {}  {} {}",
        palette.dim("arrow:"),
        palette.paint(direction.label(), ansi::CYAN),
        palette.dim("length:"),
        palette.paint(options.interval_length.to_string(), ansi::YELLOW),
        palette.dim("fallback:"),
        palette.paint(options.fallback_offset.to_string(), ansi::YELLOW),
    );
    for (idx, interval) in intervals.iter().enumerate() {
        let coords: Vec<String> = interval.geometry.0.iter().map(|c| format!("({}, {})", c.x, c.y)).collect();
        println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), palette.paint(coords.join(" → "), ansi::GREEN));
    }
    println!();
}
