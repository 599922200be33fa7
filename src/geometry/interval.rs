use super::GeometryError;
use crate::Options;
use geo::{Coord, EuclideanDistance, Line, LineString, Point};
use serde::{Deserialize, Serialize};

/// Which way a sign's arrow points along the street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    BothSides,
    Left,
    Right,
    Up,
    /// Unknown arrow. Produces a tiny interval straddling the anchor.
    Unspecified,
}

impl Direction {
    /// Map the integer arrow code carried by sign inventories.
    ///
    /// ```text
    /// 0 -> BothSides   1 -> Up   2 -> Left   3 -> Right   other -> BothSides
    /// ```
    pub fn from_arrow_code(code: i64) -> Self {
        match code {
            1 => Direction::Up,
            2 => Direction::Left,
            3 => Direction::Right,
            _ => Direction::BothSides,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "both_sides" => Direction::BothSides,
            "left" => Direction::Left,
            "right" => Direction::Right,
            "up" => Direction::Up,
            _ => Direction::Unspecified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::BothSides => "both_sides",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Unspecified => "unspecified",
        }
    }
}

/// A piece of street covered by one sign.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetInterval {
    /// At least two coordinates; zero-length when the sign sits on a vertex.
    pub geometry: LineString<f64>,
    /// The sign projected onto the street.
    pub anchor_point: Point<f64>,
}

/// [`build_intervals_with`] using default [`Options`].
pub fn build_intervals(
    street: &LineString<f64>,
    sign: Point<f64>,
    direction: Direction,
) -> Result<Vec<StreetInterval>, GeometryError> {
    build_intervals_with(street, sign, direction, &Options::default())
}

/// Derive the intervals of `street` that the sign at `sign` covers.
///
/// The sign is projected onto the street to get the anchor. `Left` and
/// `Right` run from the anchor to the start or end vertex of the segment
/// holding it; `BothSides` returns both. `Up` follows the street for
/// `interval_length / 2` on each side of the anchor, never before its start.
///
/// # Example
/// ```
/// use curbside::{Direction, build_intervals};
/// use geo::{LineString, Point};
///
/// let street = LineString::from(vec![(0.0, 0.0), (100.0, 0.0)]);
/// let intervals = build_intervals(&street, Point::new(40.0, 5.0), Direction::BothSides).unwrap();
/// assert_eq!(intervals.len(), 2);
/// assert_eq!(intervals[0].anchor_point, Point::new(40.0, 0.0));
/// ```
pub fn build_intervals_with(
    street: &LineString<f64>,
    sign: Point<f64>,
    direction: Direction,
    options: &Options,
) -> Result<Vec<StreetInterval>, GeometryError> {
    let vertices = street.0.len();
    if vertices < 2 {
        return Err(GeometryError::InvalidGeometry { vertices });
    }

    let projection = project(street, sign.0);
    let anchor = projection.point;
    let segment = nearest_segment(street, anchor).ok_or(GeometryError::InvalidGeometry { vertices })?;
    log::trace!(
        "[intervals] direction={} anchor=({}, {}) offset={} segment={:?}",
        direction.label(),
        anchor.x,
        anchor.y,
        projection.offset,
        segment
    );

    let pieces = match direction {
        Direction::BothSides => vec![vec![segment.start, anchor], vec![anchor, segment.end]],
        Direction::Left => vec![vec![segment.start, anchor]],
        Direction::Right => vec![vec![anchor, segment.end]],
        Direction::Up => {
            let half = options.interval_length / 2.0;
            let from = (projection.offset - half).max(0.0);
            vec![slice(street, from, projection.offset + half)]
        }
        Direction::Unspecified => {
            let offset = options.fallback_offset;
            vec![vec![Coord { x: anchor.x - offset, y: anchor.y }, Coord { x: anchor.x + offset, y: anchor.y }]]
        }
    };

    Ok(pieces
        .into_iter()
        .map(|coords| StreetInterval { geometry: LineString::new(coords), anchor_point: Point::from(anchor) })
        .collect())
}

/// Closest point on the street and its arc-length from the first vertex.
#[derive(Debug, Clone, Copy)]
struct Projection {
    point: Coord<f64>,
    offset: f64,
}

fn segment_length(line: &Line<f64>) -> f64 {
    line.dx().hypot(line.dy())
}

/// On ties the earliest segment wins.
fn project(street: &LineString<f64>, target: Coord<f64>) -> Projection {
    let mut best = Projection { point: street.0[0], offset: 0.0 };
    let mut best_dist = f64::INFINITY;
    let mut walked = 0.0;

    for line in street.lines() {
        let len = segment_length(&line);
        let t = if len > 0.0 {
            let rel = target - line.start;
            ((rel.x * line.dx() + rel.y * line.dy()) / (len * len)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let foot = line.start + line.delta() * t;
        let dist = (target - foot).x.hypot((target - foot).y);
        if dist < best_dist {
            best_dist = dist;
            best = Projection { point: foot, offset: walked + t * len };
        }
        walked += len;
    }

    best
}

fn nearest_segment(street: &LineString<f64>, anchor: Coord<f64>) -> Option<Line<f64>> {
    let anchor = Point::from(anchor);
    let mut best: Option<(f64, Line<f64>)> = None;
    for line in street.lines() {
        let dist = anchor.euclidean_distance(&line);
        match best {
            Some((best_dist, _)) if dist >= best_dist => {}
            _ => best = Some((dist, line)),
        }
    }
    best.map(|(_, line)| line)
}

/// Point at arc-length `distance`, clamped to the street's ends.
fn interpolate(street: &LineString<f64>, distance: f64) -> Coord<f64> {
    let coords = &street.0;
    if distance <= 0.0 {
        return coords[0];
    }

    let mut walked = 0.0;
    for line in street.lines() {
        let len = segment_length(&line);
        if len > 0.0 && walked + len >= distance {
            return line.start + line.delta() * ((distance - walked) / len);
        }
        walked += len;
    }
    coords[coords.len() - 1]
}

/// The part of the street between two arc-lengths, interior vertices included.
fn slice(street: &LineString<f64>, from: f64, to: f64) -> Vec<Coord<f64>> {
    let total: f64 = street.lines().map(|line| segment_length(&line)).sum();
    let stop = to.min(total);

    let mut coords = vec![interpolate(street, from)];
    let mut walked = 0.0;
    for line in street.lines() {
        walked += segment_length(&line);
        if walked > from && walked < stop {
            coords.push(line.end);
        }
    }
    coords.push(interpolate(street, to));
    coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn street(points: &[(f64, f64)]) -> LineString<f64> {
        LineString::from(points.to_vec())
    }

    fn coords(interval: &StreetInterval) -> Vec<(f64, f64)> {
        interval.geometry.0.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn both_sides_splits_segment_at_anchor() {
        let line = street(&[(0.0, 0.0), (100.0, 0.0)]);
        let out = build_intervals(&line, Point::new(40.0, 10.0), Direction::BothSides).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(coords(&out[0]), vec![(0.0, 0.0), (40.0, 0.0)]);
        assert_eq!(coords(&out[1]), vec![(40.0, 0.0), (100.0, 0.0)]);
        assert!(out.iter().all(|i| i.anchor_point == Point::new(40.0, 0.0)));
    }

    #[test]
    fn left_and_right_use_the_anchor_segment() {
        let line = street(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let sign = Point::new(12.0, 5.0);

        let left = build_intervals(&line, sign, Direction::Left).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(coords(&left[0]), vec![(10.0, 0.0), (10.0, 5.0)]);

        let right = build_intervals(&line, sign, Direction::Right).unwrap();
        assert_eq!(coords(&right[0]), vec![(10.0, 5.0), (10.0, 10.0)]);
    }

    #[test]
    fn shared_vertex_picks_first_segment() {
        let line = street(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let sign = Point::new(11.0, -1.0);

        let left = build_intervals(&line, sign, Direction::Left).unwrap();
        assert_eq!(coords(&left[0]), vec![(0.0, 0.0), (10.0, 0.0)]);

        let right = build_intervals(&line, sign, Direction::Right).unwrap();
        assert_eq!(coords(&right[0]), vec![(10.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn anchor_at_either_endpoint() {
        let line = street(&[(0.0, 0.0), (100.0, 0.0)]);

        let before = build_intervals(&line, Point::new(-5.0, 3.0), Direction::BothSides).unwrap();
        assert_eq!(coords(&before[0]), vec![(0.0, 0.0), (0.0, 0.0)]);
        assert_eq!(coords(&before[1]), vec![(0.0, 0.0), (100.0, 0.0)]);

        let after = build_intervals(&line, Point::new(130.0, -2.0), Direction::BothSides).unwrap();
        assert_eq!(coords(&after[0]), vec![(0.0, 0.0), (100.0, 0.0)]);
        assert_eq!(coords(&after[1]), vec![(100.0, 0.0), (100.0, 0.0)]);
    }

    #[test]
    fn up_is_clamped_at_street_start() {
        let line = street(&[(0.0, 0.0), (100.0, 0.0)]);
        let out = build_intervals(&line, Point::new(10.0, 5.0), Direction::Up).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(coords(&out[0]), vec![(0.0, 0.0), (35.0, 0.0)]);
    }

    #[test]
    fn up_is_clamped_at_street_end() {
        let line = street(&[(0.0, 0.0), (100.0, 0.0)]);
        let out = build_intervals(&line, Point::new(90.0, 5.0), Direction::Up).unwrap();
        assert_eq!(coords(&out[0]), vec![(65.0, 0.0), (100.0, 0.0)]);
    }

    #[test]
    fn up_follows_the_street_around_bends() {
        let line = street(&[(0.0, 0.0), (20.0, 0.0), (20.0, 100.0)]);

        let out = build_intervals(&line, Point::new(18.0, -1.0), Direction::Up).unwrap();
        assert_eq!(coords(&out[0]), vec![(0.0, 0.0), (20.0, 0.0), (20.0, 23.0)]);

        let out = build_intervals(&line, Point::new(19.0, 30.0), Direction::Up).unwrap();
        assert_eq!(coords(&out[0]), vec![(20.0, 5.0), (20.0, 55.0)]);
    }

    #[test]
    fn up_length_comes_from_options() {
        let line = street(&[(0.0, 0.0), (100.0, 0.0)]);
        let options = Options { interval_length: 10.0, ..Options::default() };
        let out = build_intervals_with(&line, Point::new(50.0, 1.0), Direction::Up, &options).unwrap();
        assert_eq!(coords(&out[0]), vec![(45.0, 0.0), (55.0, 0.0)]);
    }

    #[test]
    fn unspecified_direction_falls_back_to_tiny_interval() {
        let line = street(&[(0.0, 0.0), (100.0, 0.0)]);
        let out = build_intervals(&line, Point::new(40.0, 3.0), Direction::Unspecified).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(coords(&out[0]), vec![(40.0 - 0.0001, 0.0), (40.0 + 0.0001, 0.0)]);
    }

    #[test]
    fn degenerate_street_is_an_error() {
        let empty = street(&[]);
        let single = street(&[(1.0, 1.0)]);

        assert_eq!(
            build_intervals(&empty, Point::new(0.0, 0.0), Direction::Left),
            Err(GeometryError::InvalidGeometry { vertices: 0 })
        );
        assert_eq!(
            build_intervals(&single, Point::new(0.0, 0.0), Direction::Up),
            Err(GeometryError::InvalidGeometry { vertices: 1 })
        );
    }

    #[test]
    fn direction_codes_and_labels() {
        // Array of (expected, arrow_code)
        let cases = [
            (Direction::BothSides, 0),
            (Direction::Up, 1),
            (Direction::Left, 2),
            (Direction::Right, 3),
            (Direction::BothSides, 4),
            (Direction::BothSides, -1),
        ];
        for (expected, code) in cases {
            assert_eq!(Direction::from_arrow_code(code), expected, "code {code}");
        }

        assert_eq!(Direction::from_label("Left"), Direction::Left);
        assert_eq!(Direction::from_label(" both_sides "), Direction::BothSides);
        assert_eq!(Direction::from_label("diagonal"), Direction::Unspecified);
        assert_eq!(serde_json::to_string(&Direction::BothSides).unwrap(), "\"both_sides\"");
    }

    proptest! {
        #[test]
        fn intervals_are_well_formed(
            x1 in -100.0f64..100.0, y1 in -100.0f64..100.0,
            x2 in -100.0f64..100.0, y2 in -100.0f64..100.0,
            sx in -150.0f64..150.0, sy in -150.0f64..150.0
        ) {
            let line = street(&[(x1, y1), (x2, y2)]);
            let sign = Point::new(sx, sy);

            for direction in [Direction::BothSides, Direction::Left, Direction::Right, Direction::Up, Direction::Unspecified] {
                let out = build_intervals(&line, sign, direction).unwrap();
                prop_assert!(!out.is_empty());
                prop_assert!(out.iter().all(|i| i.geometry.0.len() >= 2));
            }

            let both = build_intervals(&line, sign, Direction::BothSides).unwrap();
            prop_assert_eq!(both.len(), 2);
            prop_assert_eq!(both[0].geometry.0[0], line.0[0]);
            prop_assert_eq!(both[1].geometry.0[1], line.0[1]);
            prop_assert_eq!(both[0].geometry.0[1], both[1].geometry.0[0]);
        }
    }
}
