//! Piecewise-linear membership functions.

use serde::{Deserialize, Serialize};

/// Shape of a membership function over a variable's universe.
///
/// Parameters are breakpoints in universe units and must be non-decreasing.
/// A trapezoid is 0 below `a`, ramps up to 1 at `b`, stays at 1 until `c`,
/// ramps down to 0 at `d` and is 0 above `d`. Coincident breakpoints form a
/// shoulder, so `(0, 0, 1, 2)` is 1 at `x = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipShape {
    Trapezoid([f64; 4]),
    Triangle([f64; 3]),
}

impl MembershipShape {
    pub fn trapezoid(a: f64, b: f64, c: f64, d: f64) -> Self {
        MembershipShape::Trapezoid([a, b, c, d])
    }

    pub fn triangle(a: f64, b: f64, c: f64) -> Self {
        MembershipShape::Triangle([a, b, c])
    }

    /// Breakpoints as a trapezoid; a triangle has a single-point top.
    pub fn breakpoints(&self) -> [f64; 4] {
        match *self {
            MembershipShape::Trapezoid(p) => p,
            MembershipShape::Triangle([a, b, c]) => [a, b, b, c],
        }
    }

    /// Degree of membership of `x`, always in [0, 1] for finite `x`.
    pub fn degree(&self, x: f64) -> f64 {
        let [a, b, c, d] = self.breakpoints();
        if x < a || x > d {
            0.0
        } else if x >= b && x <= c {
            1.0
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (d - x) / (d - c)
        }
    }

    /// Closed interval on which the degree can be non-zero.
    pub fn support(&self) -> (f64, f64) {
        let [a, _, _, d] = self.breakpoints();
        (a, d)
    }

    /// Closed interval on which the degree is exactly 1.
    pub fn core(&self) -> (f64, f64) {
        let [_, b, c, _] = self.breakpoints();
        (b, c)
    }

    /// Describes why the parameters cannot define a membership function, if they can't.
    pub(crate) fn defect(&self) -> Option<String> {
        let p = self.breakpoints();
        if p.iter().any(|v| !v.is_finite()) {
            return Some(format!("breakpoints {p:?} must be finite"));
        }
        if p.windows(2).any(|w| w[0] > w[1]) {
            return Some(format!("breakpoints {p:?} must be non-decreasing"));
        }
        None
    }
}

/// A named membership function, i.e. one linguistic term of a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipFunction {
    pub name: String,
    pub shape: MembershipShape,
}

impl MembershipFunction {
    pub fn new(name: impl Into<String>, shape: MembershipShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    pub fn degree(&self, x: f64) -> f64 {
        self.shape.degree(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trapezoid_regions() {
        let mf = MembershipShape::trapezoid(1.0, 2.0, 4.0, 5.0);
        assert_eq!(mf.degree(0.5), 0.0);
        assert_eq!(mf.degree(1.0), 0.0);
        assert_eq!(mf.degree(1.5), 0.5);
        assert_eq!(mf.degree(2.0), 1.0);
        assert_eq!(mf.degree(3.0), 1.0);
        assert_eq!(mf.degree(4.0), 1.0);
        assert_eq!(mf.degree(4.5), 0.5);
        assert_eq!(mf.degree(5.0), 0.0);
        assert_eq!(mf.degree(6.0), 0.0);
    }

    #[test]
    fn shoulders_are_fully_included() {
        let left = MembershipShape::trapezoid(0.0, 0.0, 1.0, 2.0);
        assert_eq!(left.degree(0.0), 1.0);
        assert_eq!(left.degree(1.5), 0.5);

        let right = MembershipShape::trapezoid(4.0, 5.0, 6.0, 6.0);
        assert_eq!(right.degree(6.0), 1.0);
        assert_eq!(right.degree(4.5), 0.5);
    }

    #[test]
    fn triangle_peaks_at_center() {
        let mf = MembershipShape::triangle(1.6, 2.0, 2.4);
        assert_eq!(mf.degree(2.0), 1.0);
        assert!((mf.degree(1.8) - 0.5).abs() < 1e-12);
        assert!((mf.degree(2.2) - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(1.6), 0.0);
        assert_eq!(mf.degree(2.4), 0.0);
        assert_eq!(mf.core(), (2.0, 2.0));
    }

    #[test]
    fn defects_are_reported() {
        assert!(MembershipShape::trapezoid(0.0, 2.0, 1.0, 3.0).defect().is_some());
        assert!(MembershipShape::triangle(0.0, f64::NAN, 1.0).defect().is_some());
        assert!(MembershipShape::trapezoid(0.0, 0.0, 0.4, 0.6).defect().is_none());
    }

    #[test]
    fn shape_json_is_tagged_by_kind() {
        let json = serde_json::to_string(&MembershipShape::triangle(1.0, 1.3, 2.0)).unwrap();
        assert_eq!(json, r#"{"triangle":[1.0,1.3,2.0]}"#);
        let back: MembershipShape = serde_json::from_str(r#"{"trapezoid":[0,0,1,1.5]}"#).unwrap();
        assert_eq!(back, MembershipShape::trapezoid(0.0, 0.0, 1.0, 1.5));
    }

    fn ordered_breakpoints() -> impl Strategy<Value = [f64; 4]> {
        prop::array::uniform4(-50.0f64..50.0).prop_map(|mut p| {
            p.sort_by(|a, b| a.total_cmp(b));
            p
        })
    }

    proptest! {
        #[test]
        fn degree_stays_in_unit_interval(p in ordered_breakpoints(), x in -100.0f64..100.0) {
            let mf = MembershipShape::Trapezoid(p);
            let mu = mf.degree(x);
            prop_assert!((0.0..=1.0).contains(&mu));
        }

        #[test]
        fn zero_outside_support_one_on_core(p in ordered_breakpoints(), t in 0.0f64..=1.0) {
            let mf = MembershipShape::Trapezoid(p);
            let (lo, hi) = mf.support();
            prop_assert_eq!(mf.degree(lo - 1.0), 0.0);
            prop_assert_eq!(mf.degree(hi + 1.0), 0.0);
            let (b, c) = mf.core();
            let x = (b + (c - b) * t).clamp(b, c);
            prop_assert_eq!(mf.degree(x), 1.0);
        }
    }
}
