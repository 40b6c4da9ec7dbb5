//! Area-of-effect templates. A shape is a set of unit offsets that is scaled
//! out ring by ring, so larger rings stay on the base rays instead of filling.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaShape {
    Round,
    Square,
    Cross,
    Plus,
    Diamond,
    Line,
    Column,
    Ray,
    Cone,
    Rectangle,
}

const SQUARE: &[(i32, i32)] =
    &[(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
const CROSS: &[(i32, i32)] = &[(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIAMOND: &[(i32, i32)] = &[(-1, 0), (0, -1), (0, 1), (1, 0)];
const LINE: &[(i32, i32)] = &[(-1, 0), (1, 0)];
const COLUMN: &[(i32, i32)] = &[(0, -1), (0, 1)];
const RAY: &[(i32, i32)] = &[(-1, -1), (1, 1), (-1, 1), (1, -1)];
const CONE: &[(i32, i32)] = &[(0, -1), (-1, -1), (1, -1)];
const RECTANGLE: &[(i32, i32)] = &[(-1, -1), (0, -1), (1, -1)];

impl AreaShape {
    pub const ALL: [AreaShape; 10] = [
        AreaShape::Round,
        AreaShape::Square,
        AreaShape::Cross,
        AreaShape::Plus,
        AreaShape::Diamond,
        AreaShape::Line,
        AreaShape::Column,
        AreaShape::Ray,
        AreaShape::Cone,
        AreaShape::Rectangle,
    ];

    /// Base `(dx, dy)` offsets for the first ring. Forward is up (negative y).
    pub fn base_offsets(self) -> &'static [(i32, i32)] {
        match self {
            AreaShape::Round | AreaShape::Square => SQUARE,
            AreaShape::Cross | AreaShape::Plus => CROSS,
            AreaShape::Diamond => DIAMOND,
            AreaShape::Line => LINE,
            AreaShape::Column => COLUMN,
            AreaShape::Ray => RAY,
            AreaShape::Cone => CONE,
            AreaShape::Rectangle => RECTANGLE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AreaShape::Round => "round",
            AreaShape::Square => "square",
            AreaShape::Cross => "cross",
            AreaShape::Plus => "plus",
            AreaShape::Diamond => "diamond",
            AreaShape::Line => "line",
            AreaShape::Column => "column",
            AreaShape::Ray => "ray",
            AreaShape::Cone => "cone",
            AreaShape::Rectangle => "rectangle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseShapeError(pub String);

impl fmt::Display for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported shape: {}", self.0)
    }
}

impl Error for ParseShapeError {}

impl FromStr for AreaShape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AreaShape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| ParseShapeError(s.to_string()))
    }
}

impl fmt::Display for AreaShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ring `i` (1-based) is every base offset multiplied by `i`. Candidates are
/// translated to `origin`, filtered by `predicate`, and the origin itself is
/// never returned. Candidates outside the `i32` plane are skipped, and rings
/// stop once none of their candidates is representable.
pub fn compute_area(
    origin: Pos,
    shape: AreaShape,
    rings: u32,
    predicate: impl Fn(Pos) -> bool,
) -> Vec<Pos> {
    let base = shape.base_offsets();
    let mut area = Vec::new();
    for ring in 1..=rings {
        let Ok(ring) = i32::try_from(ring) else {
            break;
        };
        let mut representable = false;
        for &(dx, dy) in base {
            let Some(candidate) = origin.checked_offset(dx, dy, ring) else {
                continue;
            };
            representable = true;
            if candidate != origin && predicate(candidate) {
                area.push(candidate);
            }
        }
        if !representable {
            break;
        }
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_ring_cross_is_the_four_neighbours() {
        let area = compute_area(Pos { y: 5, x: 5 }, AreaShape::Cross, 1, |_| true);
        assert_eq!(area, vec![
            Pos { y: 4, x: 5 },
            Pos { y: 5, x: 6 },
            Pos { y: 6, x: 5 },
            Pos { y: 5, x: 4 },
        ]);
    }

    #[test]
    fn rings_extend_along_rays_without_filling() {
        let area = compute_area(Pos { y: 0, x: 0 }, AreaShape::Line, 3, |_| true);
        assert_eq!(area, vec![
            Pos { y: 0, x: -1 },
            Pos { y: 0, x: 1 },
            Pos { y: 0, x: -2 },
            Pos { y: 0, x: 2 },
            Pos { y: 0, x: -3 },
            Pos { y: 0, x: 3 },
        ]);

        let square = compute_area(Pos { y: 0, x: 0 }, AreaShape::Square, 2, |_| true);
        assert_eq!(square.len(), 16);
        assert!(!square.contains(&Pos { y: 1, x: 2 }));
    }

    #[test]
    fn cone_and_rectangle_point_forward() {
        let origin = Pos { y: 3, x: 3 };
        for shape in [AreaShape::Cone, AreaShape::Rectangle] {
            let area = compute_area(origin, shape, 1, |_| true);
            assert_eq!(area.len(), 3);
            assert!(area.iter().all(|p| p.y == 2));
        }
    }

    #[test]
    fn predicate_filters_candidates() {
        let area = compute_area(Pos { y: 0, x: 0 }, AreaShape::Diamond, 2, |p| p.x >= 0 && p.y >= 0);
        assert_eq!(area, vec![
            Pos { y: 1, x: 0 },
            Pos { y: 0, x: 1 },
            Pos { y: 2, x: 0 },
            Pos { y: 0, x: 2 },
        ]);
    }

    #[test]
    fn zero_rings_is_empty() {
        assert!(compute_area(Pos { y: 1, x: 1 }, AreaShape::Round, 0, |_| true).is_empty());
    }

    #[test]
    fn huge_ring_count_near_the_edge_stops_at_the_plane() {
        let origin = Pos::new(0, i32::MIN + 2);

        assert!(compute_area(origin, AreaShape::Cone, u32::MAX, |_| false).is_empty());

        let area = compute_area(origin, AreaShape::Cone, u32::MAX, |_| true);
        assert_eq!(area.len(), 6);
        assert!(area.iter().all(|p| p.y < origin.y));
    }

    #[test]
    fn overflowing_candidates_are_skipped() {
        let area = compute_area(Pos::new(i32::MAX, 0), AreaShape::Line, 1, |_| true);
        assert_eq!(area, vec![Pos::new(i32::MAX - 1, 0)]);

        let corner = Pos::new(i32::MAX - 1, i32::MAX - 1);
        let area = compute_area(corner, AreaShape::Ray, 2, |_| true);
        assert_eq!(area, vec![
            Pos::new(i32::MAX - 2, i32::MAX - 2),
            Pos::new(i32::MAX, i32::MAX),
            Pos::new(i32::MAX - 2, i32::MAX),
            Pos::new(i32::MAX, i32::MAX - 2),
            Pos::new(i32::MAX - 3, i32::MAX - 3),
        ]);
    }

    #[test]
    fn shape_names_parse_and_unknown_names_fail() {
        for shape in AreaShape::ALL {
            assert_eq!(shape.name().parse::<AreaShape>(), Ok(shape));
        }
        assert_eq!(
            "hexagon".parse::<AreaShape>(),
            Err(ParseShapeError("hexagon".to_string()))
        );
    }
}
