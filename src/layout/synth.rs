//! Nail layout synthesis for geometric shapes
//!
//! Both shapes are maximized within the unit square. Conventions:
//! - circle: centered at (0.5, 0.5) with radius 0.5, nail 0 at angle 0
//!   (pointing along +x), angles increasing counter-clockwise
//! - square: nail 0 at the (0, 0) corner, walking the bottom edge left to
//!   right, then the right edge upwards, the top edge right to left and the
//!   left edge downwards

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use super::{LayoutError, Nail};

/// Perimeter length of the unit square
pub const SQUARE_PERIMETER: f64 = 4.0;

/// Minimum nail count for a square layout (one per corner)
pub const SQUARE_MIN_NAILS: usize = 4;

const CENTER: f64 = 0.5;
const RADIUS: f64 = 0.5;

/// Shapes nails can be arranged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
}

impl Shape {
    /// All supported shapes, in the order they are listed to users
    pub const ALL: [Shape; 2] = [Shape::Circle, Shape::Square];

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
        }
    }

    /// Smallest nail count the shape can be built from
    pub fn min_nails(&self) -> usize {
        match self {
            Shape::Circle => 1,
            Shape::Square => SQUARE_MIN_NAILS,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == lowered)
            .ok_or_else(|| {
                let valid: Vec<&str> = Shape::ALL.iter().map(Shape::name).collect();
                LayoutError::unknown_shape(s, &valid)
            })
    }
}

/// Compute `count` nail positions arranged in `shape`
///
/// Deterministic: the same inputs always produce the same layout.
pub fn synthesize(count: usize, shape: Shape) -> Result<Vec<Nail>, LayoutError> {
    if count == 0 {
        return Err(LayoutError::InvalidNailCount { count: 0 });
    }
    if count < shape.min_nails() {
        return Err(LayoutError::TooFewNails {
            shape: shape.name().to_string(),
            minimum: shape.min_nails(),
            count,
        });
    }

    let nails = match shape {
        Shape::Circle => circle_nails(count),
        Shape::Square => square_nails(count),
    };
    Ok(nails)
}

/// Validate a user-supplied nail count and shape name
///
/// Accepts signed counts so that negative values are reported as invalid
/// nail counts rather than rejected upstream. Zero passes through and is
/// rejected by [`synthesize`].
pub fn parse_request(count: i64, shape: &str) -> Result<(usize, Shape), LayoutError> {
    let count = usize::try_from(count).map_err(|_| LayoutError::InvalidNailCount { count })?;
    let shape = shape.parse()?;
    Ok((count, shape))
}

fn circle_nails(count: usize) -> Vec<Nail> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            Nail::new(
                CENTER + RADIUS * angle.cos(),
                CENTER + RADIUS * angle.sin(),
            )
        })
        .collect()
}

fn square_nails(count: usize) -> Vec<Nail> {
    let spacing = SQUARE_PERIMETER / count as f64;
    (0..count)
        .map(|i| point_on_square_perimeter(i as f64 * spacing))
        .collect()
}

/// Map an arc-length position along the square's perimeter to a point
///
/// Positions on an edge boundary belong to the earlier edge, so 1.0 is the
/// (1, 0) corner reached along the bottom edge.
pub fn point_on_square_perimeter(distance: f64) -> Nail {
    let d = distance.rem_euclid(SQUARE_PERIMETER);
    if d <= 1.0 {
        Nail::new(d, 0.0)
    } else if d <= 2.0 {
        Nail::new(1.0, d - 1.0)
    } else if d <= 3.0 {
        Nail::new(1.0 - (d - 2.0), 1.0)
    } else {
        Nail::new(0.0, 1.0 - (d - 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Inverse of `point_on_square_perimeter` for points on the perimeter
    fn perimeter_distance(nail: &Nail) -> f64 {
        const EPS: f64 = 1e-12;
        if nail.y.abs() < EPS && nail.x < 1.0 - EPS {
            nail.x
        } else if (nail.x - 1.0).abs() < EPS && nail.y < 1.0 - EPS {
            1.0 + nail.y
        } else if (nail.y - 1.0).abs() < EPS && nail.x > EPS {
            2.0 + (1.0 - nail.x)
        } else {
            3.0 + (1.0 - nail.y)
        }
    }

    fn angle_of(nail: &Nail) -> f64 {
        (nail.y - CENTER).atan2(nail.x - CENTER).rem_euclid(TAU)
    }

    #[test]
    fn test_circle_count_and_radius() {
        for n in 1..=64 {
            let nails = synthesize(n, Shape::Circle).unwrap();
            assert_eq!(nails.len(), n);
            for nail in &nails {
                let r = nail.distance_to(&Nail::new(CENTER, CENTER));
                assert!((r - RADIUS).abs() <= 1e-9, "n={} r={}", n, r);
            }
        }
    }

    #[test]
    fn test_circle_uniform_increasing_angles() {
        for n in 2..=50 {
            let nails = synthesize(n, Shape::Circle).unwrap();
            let step = TAU / n as f64;
            assert!(angle_of(&nails[0]).abs() < 1e-9);
            let mut previous = 0.0;
            for nail in &nails[1..] {
                let angle = angle_of(nail);
                assert!(angle > previous, "n={} angle not increasing", n);
                assert!((angle - previous - step).abs() < 1e-9, "n={} uneven", n);
                previous = angle;
            }
        }
    }

    #[test]
    fn test_circle_degenerate_counts() {
        assert_eq!(synthesize(1, Shape::Circle).unwrap(), vec![Nail::new(1.0, 0.5)]);
        let two = synthesize(2, Shape::Circle).unwrap();
        assert!((two[1].x - 0.0).abs() < 1e-12);
        assert!((two[1].y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_square_four_corners() {
        let nails = synthesize(4, Shape::Square).unwrap();
        assert_eq!(
            nails,
            vec![
                Nail::new(0.0, 0.0),
                Nail::new(1.0, 0.0),
                Nail::new(1.0, 1.0),
                Nail::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_square_on_perimeter_and_evenly_spaced() {
        for n in 4..=60 {
            let nails = synthesize(n, Shape::Square).unwrap();
            assert_eq!(nails.len(), n);
            let spacing = SQUARE_PERIMETER / n as f64;
            for (i, nail) in nails.iter().enumerate() {
                let on_vertical = nail.x == 0.0 || nail.x == 1.0;
                let on_horizontal = nail.y == 0.0 || nail.y == 1.0;
                assert!(on_vertical || on_horizontal, "n={} nail {} off edge", n, i);
                assert!(nail.in_unit_square());

                let next = &nails[(i + 1) % n];
                let gap = (perimeter_distance(next) - perimeter_distance(nail))
                    .rem_euclid(SQUARE_PERIMETER);
                assert!((gap - spacing).abs() < 1e-9, "n={} gap {} at {}", n, gap, i);
            }
        }
    }

    #[test]
    fn test_square_requires_four_nails() {
        for n in 1..4 {
            assert_eq!(
                synthesize(n, Shape::Square),
                Err(LayoutError::TooFewNails {
                    shape: "square".to_string(),
                    minimum: 4,
                    count: n,
                })
            );
        }
    }

    #[test]
    fn test_zero_nails_rejected() {
        for shape in Shape::ALL {
            assert_eq!(
                synthesize(0, shape),
                Err(LayoutError::InvalidNailCount { count: 0 })
            );
        }
    }

    #[test]
    fn test_parse_request() {
        assert_eq!(parse_request(8, "Circle"), Ok((8, Shape::Circle)));
        assert_eq!(
            parse_request(-3, "circle"),
            Err(LayoutError::InvalidNailCount { count: -3 })
        );
        assert!(matches!(
            parse_request(8, "triangle"),
            Err(LayoutError::UnknownShape { .. })
        ));
    }

    #[test]
    fn test_shape_parse() {
        assert_eq!("square".parse::<Shape>().unwrap(), Shape::Square);
        assert_eq!(" CIRCLE ".parse::<Shape>().unwrap(), Shape::Circle);
        let err = "star".parse::<Shape>().unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownShape {
                name: "star".to_string(),
                valid: "circle, square".to_string(),
            }
        );
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            synthesize(37, Shape::Circle).unwrap(),
            synthesize(37, Shape::Circle).unwrap()
        );
    }
}
