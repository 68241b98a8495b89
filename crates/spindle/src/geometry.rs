use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

pub type Point = Vec2;

impl Vec2 {
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).length()
    }

    pub fn lerp(self, end: Vec2, t: f64) -> Vec2 {
        self + (end - self) * t
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Point on a circle of `radius` around the origin, `degrees` measured counter-clockwise from +x.
pub fn position_from_angle(degrees: f64, radius: f64) -> Point {
    let radians = degrees.to_radians();
    Point::new(radius * radians.cos(), radius * radians.sin())
}

/// Polar angle of `point` in degrees, in (-180, 180].
pub fn angle_of(point: Point) -> f64 {
    point.y.atan2(point.x).to_degrees()
}

/// Signed shortest rotation from `from` to `to`, normalised into (-180, 180].
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    180.0 - (180.0 - (to - from)).rem_euclid(360.0)
}

/// Wraps an angle into [0, 360).
pub fn wrap_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_shortest_delta_range() {
        let cases = [
            (0.0, 90.0, 90.0),
            (90.0, 0.0, -90.0),
            (350.0, 10.0, 20.0),
            (10.0, 350.0, -20.0),
            (0.0, 180.0, 180.0),
            (180.0, 0.0, 180.0),
            (-170.0, 170.0, -20.0),
            (45.0, 45.0, 0.0),
            (90.0, 450.0, 0.0),
        ];

        for (from, to, expected) in cases {
            let delta = shortest_delta(from, to);
            assert!(
                (delta - expected).abs() < EPS,
                "{from} -> {to}: got {delta}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_angle_round_trip() {
        for deg in [-135.0, -90.0, 0.0, 18.0, 90.0, 162.0, 180.0] {
            let p = position_from_angle(deg, 200.0);
            assert!((p.length() - 200.0).abs() < 1e-9);
            assert!(shortest_delta(angle_of(p), deg).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(378.0) - 18.0).abs() < EPS);
        assert!((wrap_degrees(-90.0) - 270.0).abs() < EPS);
        assert_eq!(wrap_degrees(0.0), 0.0);
    }
}
