//! Angle units, vectors, and rotation primitives shared across the sunshade planner workspace.

/// Angular constants.
pub mod constants {
    /// Degrees per radian.
    pub const DEG_PER_RAD: f64 = 180.0 / std::f64::consts::PI;
    /// Truncated degrees-per-radian factor kept for reproducing older grids.
    pub const LEGACY_DEG_PER_RAD: f64 = 57.296;
    /// Ecliptic longitude swept by the antisolar point per day (degrees).
    pub const DEG_PER_DAY: f64 = 1.0;
}

/// Scalar helpers for angle derivations.
pub mod units {
    /// Arcsine that tolerates floating drift just outside `[-1, 1]`.
    #[inline]
    pub fn clamped_asin(v: f64) -> f64 {
        v.clamp(-1.0, 1.0).asin()
    }

    /// Sign as a trit: `1`, `-1`, or `0` for either signed zero.
    ///
    /// Unlike `f64::signum`, `-0.0` maps to `0`.
    #[inline]
    pub fn sign_trit(v: f64) -> i8 {
        if v > 0.0 {
            1
        } else if v < 0.0 {
            -1
        } else {
            0
        }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D direction vector.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }
}

/// Right-handed 3x3 rotation matrices acting on column vectors.
///
/// All constructors build *active* rotations: a positive angle turns a vector
/// counterclockwise when viewed from the positive axis toward the origin, so
/// `about_z(90°)` takes `[1, 0, 0]` to `[0, 1, 0]`. Composition follows the
/// usual matrix convention: in `b.compose(&a)` the rotation `a` acts first.
pub mod rotation {
    use std::ops::Mul;

    use super::vector::{Vector3, dot};

    /// Row-major rotation matrix.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Rotation3 {
        rows: [[f64; 3]; 3],
    }

    impl Rotation3 {
        pub fn identity() -> Self {
            Self {
                rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            }
        }

        /// Rotation about the X axis by `angle_deg` degrees.
        pub fn about_x(angle_deg: f64) -> Self {
            let (s, c) = angle_deg.to_radians().sin_cos();
            Self {
                rows: [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]],
            }
        }

        /// Rotation about the Y axis by `angle_deg` degrees.
        pub fn about_y(angle_deg: f64) -> Self {
            let (s, c) = angle_deg.to_radians().sin_cos();
            Self {
                rows: [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
            }
        }

        /// Rotation about the Z axis by `angle_deg` degrees.
        pub fn about_z(angle_deg: f64) -> Self {
            let (s, c) = angle_deg.to_radians().sin_cos();
            Self {
                rows: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
            }
        }

        /// Matrix product `self * inner`; `inner` is applied to vectors first.
        pub fn compose(&self, inner: &Rotation3) -> Rotation3 {
            let mut rows = [[0.0; 3]; 3];
            for (i, row) in rows.iter_mut().enumerate() {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = (0..3).map(|k| self.rows[i][k] * inner.rows[k][j]).sum();
                }
            }
            Rotation3 { rows }
        }

        /// Apply the rotation to a column vector.
        #[inline]
        pub fn apply(&self, v: &Vector3) -> Vector3 {
            [
                dot(&self.rows[0], v),
                dot(&self.rows[1], v),
                dot(&self.rows[2], v),
            ]
        }

        /// Inverse of a proper rotation.
        pub fn transpose(&self) -> Rotation3 {
            let r = &self.rows;
            Rotation3 {
                rows: [
                    [r[0][0], r[1][0], r[2][0]],
                    [r[0][1], r[1][1], r[2][1]],
                    [r[0][2], r[1][2], r[2][2]],
                ],
            }
        }
    }

    impl Mul for Rotation3 {
        type Output = Rotation3;

        fn mul(self, rhs: Rotation3) -> Rotation3 {
            self.compose(&rhs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rotation::Rotation3;
    use super::units::{clamped_asin, sign_trit};
    use super::vector::norm;

    fn close(a: &[f64; 3], b: &[f64; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn quarter_turns_follow_right_hand_rule() {
        assert!(close(&Rotation3::about_z(90.0).apply(&[1.0, 0.0, 0.0]), &[0.0, 1.0, 0.0]));
        assert!(close(&Rotation3::about_x(90.0).apply(&[0.0, 1.0, 0.0]), &[0.0, 0.0, 1.0]));
        assert!(close(&Rotation3::about_y(90.0).apply(&[0.0, 0.0, 1.0]), &[1.0, 0.0, 0.0]));
    }

    #[test]
    fn compose_applies_inner_first() {
        let rx = Rotation3::about_x(90.0);
        let rz = Rotation3::about_z(90.0);
        // x-turn leaves +X alone, then z-turn takes it to +Y.
        assert!(close(&(rz * rx).apply(&[1.0, 0.0, 0.0]), &[0.0, 1.0, 0.0]));
        // z-turn takes +X to +Y, then x-turn takes +Y to +Z.
        assert!(close(&(rx * rz).apply(&[1.0, 0.0, 0.0]), &[0.0, 0.0, 1.0]));
    }

    #[test]
    fn transpose_inverts_rotation() {
        let m = Rotation3::about_y(33.0) * Rotation3::about_x(-12.0);
        let v = [0.3, -0.4, 0.5];
        assert!(close(&m.transpose().apply(&m.apply(&v)), &v));
        assert!((norm(&m.apply(&v)) - norm(&v)).abs() < 1e-12);
        assert_eq!(Rotation3::identity().compose(&m), m);
    }

    #[test]
    fn sign_trit_treats_negative_zero_as_zero() {
        assert_eq!(sign_trit(-0.0), 0);
        assert_eq!(sign_trit(0.0), 0);
        assert_eq!(sign_trit(1e-300), 1);
        assert_eq!(sign_trit(-2.5), -1);
    }

    #[test]
    fn clamped_asin_absorbs_drift() {
        let half_pi = std::f64::consts::FRAC_PI_2;
        assert!((clamped_asin(1.0 + 1e-15) - half_pi).abs() < 1e-15);
        assert!((clamped_asin(-1.0 - 1e-15) + half_pi).abs() < 1e-15);
    }
}
