//! Per-sign pipeline: parse the description and locate what the sign covers.

use crate::geometry::{Direction, GeometryError, StreetInterval, StreetLookup, build_intervals_with};
use crate::{Options, RestrictionRule, parse};
use geo::Point;

/// One record from a sign inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Sign {
    pub id: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Upstream arrow code, see [`Direction::from_arrow_code`].
    pub arrow_code: i64,
}

impl Sign {
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    pub fn direction(&self) -> Direction {
        Direction::from_arrow_code(self.arrow_code)
    }
}

/// Everything derived from a single sign.
#[derive(Debug, Clone)]
pub struct SignReport {
    pub sign_id: String,
    pub rule: RestrictionRule,
    pub direction: Direction,
    pub street_id: Option<i64>,
    pub street_name: Option<String>,
    /// Empty when no street was found near the sign.
    pub intervals: Vec<StreetInterval>,
}

/// Parse the sign's description and build its intervals on the nearest street.
///
/// A missing street is not an error. A street that comes back with fewer
/// than two vertices is.
pub fn analyze_sign<L: StreetLookup + ?Sized>(
    sign: &Sign,
    lookup: &L,
    options: &Options,
) -> Result<SignReport, GeometryError> {
    let rule = parse(&sign.description);
    let direction = sign.direction();

    let Some(street) = lookup.nearest_street(sign.latitude, sign.longitude, options.search_radius_m) else {
        log::debug!("[sign] id={} no street within {}m", sign.id, options.search_radius_m);
        return Ok(SignReport {
            sign_id: sign.id.clone(),
            rule,
            direction,
            street_id: None,
            street_name: None,
            intervals: Vec::new(),
        });
    };

    let intervals = build_intervals_with(&street.geometry, sign.point(), direction, options).map_err(|err| {
        log::warn!("[sign] id={} street={}: {}", sign.id, street.id, err);
        err
    })?;

    Ok(SignReport {
        sign_id: sign.id.clone(),
        rule,
        direction,
        street_id: Some(street.id),
        street_name: Some(street.name),
        intervals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{StaticStreets, Street};
    use crate::RestrictionKind;
    use geo::LineString;

    struct BrokenLookup;

    impl StreetLookup for BrokenLookup {
        fn nearest_street(&self, _lat: f64, _lon: f64, _radius_m: f64) -> Option<Street> {
            Some(Street {
                id: 9,
                name: "Ruelle".to_string(),
                highway: "service".to_string(),
                geometry: LineString::from(vec![(-73.57, 45.52)]),
            })
        }
    }

    fn sign(arrow_code: i64) -> Sign {
        Sign {
            id: "SP-1042".to_string(),
            description: r"\P 09h-17h LUN AU VEN".to_string(),
            latitude: 45.5249,
            longitude: -73.5650,
            arrow_code,
        }
    }

    fn rachel() -> StaticStreets {
        StaticStreets::new(vec![Street {
            id: 42,
            name: "Rue Rachel".to_string(),
            highway: "secondary".to_string(),
            geometry: LineString::from(vec![(-73.5800, 45.5250), (-73.5600, 45.5250)]),
        }])
    }

    #[test]
    fn sign_on_a_street() {
        let report = analyze_sign(&sign(0), &rachel(), &Options::default()).unwrap();

        assert_eq!(report.sign_id, "SP-1042");
        assert_eq!(report.rule.kind(), RestrictionKind::NoParking);
        assert_eq!(report.direction, Direction::BothSides);
        assert_eq!(report.street_id, Some(42));
        assert_eq!(report.street_name.as_deref(), Some("Rue Rachel"));
        assert_eq!(report.intervals.len(), 2);
    }

    #[test]
    fn arrow_code_selects_direction() {
        let report = analyze_sign(&sign(2), &rachel(), &Options::default()).unwrap();
        assert_eq!(report.direction, Direction::Left);
        assert_eq!(report.intervals.len(), 1);
    }

    #[test]
    fn no_street_means_no_intervals() {
        let report = analyze_sign(&sign(0), &StaticStreets::default(), &Options::default()).unwrap();
        assert_eq!(report.street_id, None);
        assert!(report.intervals.is_empty());
        assert!(report.rule.is_restricted());
    }

    #[test]
    fn degenerate_street_is_reported() {
        let err = analyze_sign(&sign(1), &BrokenLookup, &Options::default()).unwrap_err();
        assert_eq!(err, GeometryError::InvalidGeometry { vertices: 1 });
    }
}
