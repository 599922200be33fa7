//! Restriction type and the unconditional "at all times" phrase.

use crate::RestrictionKind;

/// Phrases marking a restriction that holds regardless of day, time or date.
const ALWAYS_PHRASES: &[&str] = &["EN TOUT TEMPS", "AT ALL TIMES"];

/// `\P` / `\A` marker prefix, else a paid-parking signature.
///
/// ```text
/// "\P 09H-17H ..."       -> NoParking   (marker wins)
/// "\A EN TOUT TEMPS"     -> NoStopping
/// "PARCOMETRE 9H-21H"    -> Paid
/// "P 15 MIN 9H-17H"      -> Paid
/// "STATIONNEMENT"        -> (none: Unrestricted)
/// ```
pub fn restriction_kind() -> crate::Pass {
    pass! {
        name: "restriction kind",
        run: |text, draft| {
            let kind = kind_of(text);
            draft.kind = kind;
            usize::from(kind.is_some())
        }
    }
}

pub fn always_restricted() -> crate::Pass {
    pass! {
        name: "always restricted",
        run: |text, draft| {
            let found = ALWAYS_PHRASES.iter().filter(|phrase| text.contains(*phrase)).count();
            draft.always_restricted = found > 0;
            found
        }
    }
}

fn kind_of(text: &str) -> Option<RestrictionKind> {
    let text = text.trim_start();
    if text.starts_with(r"\P") {
        Some(RestrictionKind::NoParking)
    } else if text.starts_with(r"\A") {
        Some(RestrictionKind::NoStopping)
    } else if is_paid(text) {
        Some(RestrictionKind::Paid)
    } else {
        None
    }
}

fn is_paid(text: &str) -> bool {
    text.contains("PARCOMETRE") || regex!(r"\bP\s+\d+(?:\s*MIN|H)").is_match(text)
}
