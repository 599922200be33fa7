//! `HHhMM-HHhMM` time-of-day windows.

use crate::TimeWindow;
use crate::engine::TriggerMask;
use chrono::NaiveTime;

/// Every `09H30-10H30` / `9H-21H` token, in text order.
///
/// Hour 24 means midnight and is stored as 00:00. Tokens that are not a
/// valid clock time are dropped, and the hour must start a word so `109H`
/// is not read as `9H`.
pub fn time_windows() -> crate::Pass {
    pass! {
        name: "time window",
        buckets: TriggerMask::HAS_HOUR,
        run: |text, draft| {
            let mut found = 0;
            for caps in regex!(r"\b(\d{1,2})H(\d{0,2})\s*-\s*(\d{1,2})H(\d{0,2})").captures_iter(text) {
                match (clock_time(&caps[1], &caps[2]), clock_time(&caps[3], &caps[4])) {
                    (Some(start), Some(end)) => {
                        log::trace!("[time window] {:?} -> {}..{}", &caps[0], start, end);
                        draft.time_windows.push(TimeWindow::new(start, end));
                        found += 1;
                    }
                    _ => log::trace!("[time window] dropped {:?}", &caps[0]),
                }
            }
            found
        }
    }
}

fn clock_time(hour: &str, minute: &str) -> Option<NaiveTime> {
    let hour = match hour.parse::<u32>().ok()? {
        24 => 0,
        h => h,
    };
    let minute: u32 = if minute.is_empty() { 0 } else { minute.parse().ok()? };
    NaiveTime::from_hms_opt(hour, minute, 0)
}
