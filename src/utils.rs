use crate::{shape::Point, Float, EPSILON};

#[derive(Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Clock Wise
    ///
    ///  a     b
    ///             c
    ///
    CW,
    /// Counter Clock Wise
    ///             c
    ///  a     b
    CCW,
    /// Collinear, within `EPSILON`
    ///  a     b    c
    Collinear,
}

impl Orientation {
    pub fn is_cw(&self) -> bool {
        matches!(self, Self::CW)
    }
}

fn coord(p: Point) -> robust::Coord<Float> {
    robust::Coord { x: p.x, y: p.y }
}

pub fn orient_2d(a: Point, b: Point, c: Point) -> Orientation {
    let val = robust::orient2d(coord(a), coord(b), coord(c));

    if val.abs() < EPSILON {
        Orientation::Collinear
    } else if val > 0. {
        Orientation::CCW
    } else {
        Orientation::CW
    }
}

/// The circle through three sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: Float,
}

impl Circle {
    /// x where the sweep line leaves the circle, which is when the middle arc vanishes
    pub fn rightmost_x(&self) -> Float {
        self.center.x + self.radius
    }
}

/// Circle through `a`, `b`, `c` if they make a clockwise turn.
/// Counter clockwise and collinear triples never converge on the beach line, so they
/// have no circle.
pub fn circumcircle_cw(a: Point, b: Point, c: Point) -> Option<Circle> {
    if !orient_2d(a, b, c).is_cw() {
        return None;
    }

    // perpendicular bisectors of ab and ac, solved as a 2x2 linear system
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let ac_x = c.x - a.x;
    let ac_y = c.y - a.y;
    let e = ab_x * (a.x + b.x) + ab_y * (a.y + b.y);
    let f = ac_x * (a.x + c.x) + ac_y * (a.y + c.y);
    let g = 2. * (ab_x * (c.y - b.y) - ab_y * (c.x - b.x));

    if g.abs() < EPSILON {
        return None;
    }

    let center = Point::new((ac_y * e - ab_y * f) / g, (ab_x * f - ac_x * e) / g);
    Some(Circle {
        center,
        radius: center.distance(&a),
    })
}

/// x of the parabola with `focus` and vertical `directrix` at height `y`.
/// None when the focus sits on the directrix, the parabola is then a horizontal ray.
pub fn parabola_x(focus: Point, y: Float, directrix: Float) -> Option<Float> {
    let denominator = 2. * (focus.x - directrix);
    if denominator.abs() < EPSILON {
        return None;
    }
    let dy = focus.y - y;
    Some((focus.x * focus.x + dy * dy - directrix * directrix) / denominator)
}

/// y of the breakpoint between the arc of `lower` and the arc of `upper` right above it,
/// with the sweep line at `directrix`.
pub fn breakpoint_y(lower: Point, upper: Point, directrix: Float) -> Float {
    if (lower.x - upper.x).abs() < EPSILON {
        return (lower.y + upper.y) / 2.;
    }
    if (upper.x - directrix).abs() < EPSILON {
        return upper.y;
    }
    if (lower.x - directrix).abs() < EPSILON {
        return lower.y;
    }

    // subtract the two parabola equations, the breakpoint is a root of
    // a * y^2 + b * y + c = 0
    let z0 = 2. * (lower.x - directrix);
    let z1 = 2. * (upper.x - directrix);

    let a = 1. / z0 - 1. / z1;
    let b = -2. * (lower.y / z0 - upper.y / z1);
    let c = (lower.y * lower.y + lower.x * lower.x - directrix * directrix) / z0
        - (upper.y * upper.y + upper.x * upper.x - directrix * directrix) / z1;

    // the root is (-b - sqrt(disc)) / 2a, rewritten to avoid cancellation when b <= 0
    let sqrt_disc = (b * b - 4. * a * c).max(0.).sqrt();
    if b > 0. {
        (-b - sqrt_disc) / (2. * a)
    } else {
        let denominator = sqrt_disc - b;
        if denominator == 0. {
            0.
        } else {
            2. * c / denominator
        }
    }
}

/// The breakpoint between the arc of `lower` and the arc of `upper`.
/// None only if both foci are on the directrix.
pub fn breakpoint(lower: Point, upper: Point, directrix: Float) -> Option<Point> {
    let y = breakpoint_y(lower, upper, directrix);
    let x = parabola_x(lower, y, directrix).or_else(|| parabola_x(upper, y, directrix))?;
    Some(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Float, b: Float) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_orient_2d() {
        assert_eq!(
            orient_2d(Point::new(0., 0.), Point::new(0., 1.), Point::new(0., 2.)),
            Orientation::Collinear
        );

        assert_eq!(
            orient_2d(Point::new(0., 0.), Point::new(1., 1.), Point::new(2., 2.)),
            Orientation::Collinear
        );

        assert_eq!(
            orient_2d(Point::new(0., 0.), Point::new(1., 1.), Point::new(2., 3.)),
            Orientation::CCW
        );

        assert_eq!(
            orient_2d(Point::new(0., 0.), Point::new(1., 1.), Point::new(2., 1.)),
            Orientation::CW
        );
    }

    #[test]
    fn test_circumcircle() {
        let circle =
            circumcircle_cw(Point::new(10., 0.), Point::new(0., 0.), Point::new(0., 10.))
                .unwrap();
        assert_close(circle.center.x, 5.);
        assert_close(circle.center.y, 5.);
        assert_close(circle.radius, (50. as Float).sqrt());
        assert_close(circle.rightmost_x(), 5. + (50. as Float).sqrt());

        // same sites counter clockwise
        assert!(
            circumcircle_cw(Point::new(0., 10.), Point::new(0., 0.), Point::new(10., 0.))
                .is_none()
        );

        // collinear
        assert!(
            circumcircle_cw(Point::new(0., 0.), Point::new(5., 0.), Point::new(10., 0.))
                .is_none()
        );

        // a site repeated around a split arc
        assert!(
            circumcircle_cw(Point::new(0., 0.), Point::new(5., 0.), Point::new(0., 0.))
                .is_none()
        );
    }

    #[test]
    fn test_parabola_x() {
        // focus (0, 0), directrix x = 10: the vertex is at x = 5
        assert_close(parabola_x(Point::new(0., 0.), 0., 10.).unwrap(), 5.);
        // every point of the parabola is as far from the focus as from the directrix
        let x = parabola_x(Point::new(0., 0.), 4., 10.).unwrap();
        assert_close(Point::new(x, 4.).distance(&Point::new(0., 0.)), 10. - x);

        assert!(parabola_x(Point::new(10., 3.), 4., 10.).is_none());
    }

    #[test]
    fn test_breakpoint_general() {
        let a = Point::new(0., 0.);
        let b = Point::new(10., 0.);

        // a below b: the lower of the two intersections
        let lower = breakpoint(a, b, 20.).unwrap();
        assert_close(lower.x, 5.);
        assert!(lower.y < 0.);
        assert_close(lower.distance(&a), 20. - lower.x);
        assert_close(lower.distance(&b), 20. - lower.x);

        // b below a: the upper one
        let upper = breakpoint(b, a, 20.).unwrap();
        assert_close(upper.x, 5.);
        assert_close(upper.y, -lower.y);
    }

    #[test]
    fn test_breakpoint_moves_away_from_sites() {
        let b = Point::new(10., 0.);
        let c = Point::new(0., 10.);

        let near = breakpoint(b, c, 20.).unwrap();
        let far = breakpoint(b, c, 200.).unwrap();
        assert_close(near.x, near.y);
        assert_close(far.x, far.y);
        assert!(far.x > near.x && near.x > 5.);
    }

    #[test]
    fn test_breakpoint_special_cases() {
        // same x: horizontal bisector
        assert_close(
            breakpoint_y(Point::new(0., 0.), Point::new(0., 10.), 3.),
            5.,
        );
        // a focus on the directrix
        assert_close(
            breakpoint_y(Point::new(0., 0.), Point::new(5., -10.), 5.),
            -10.,
        );
        assert_close(
            breakpoint_y(Point::new(5., -10.), Point::new(0., 0.), 5.),
            -10.,
        );

        let p = breakpoint(Point::new(5., -10.), Point::new(0., 0.), 5.).unwrap();
        assert_close(p.y, -10.);
        assert_close(p.x, parabola_x(Point::new(0., 0.), -10., 5.).unwrap());

        assert!(breakpoint(Point::new(5., 0.), Point::new(5., 10.), 5.).is_none());
    }
}
