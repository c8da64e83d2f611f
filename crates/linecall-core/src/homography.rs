//! Planar homography between the image plane and the court plane.
//!
//! The transform is solved from exactly four point correspondences via the
//! standard 8-DOF DLT linear system with Hartley normalization. Applying it
//! divides by the projective coordinate, so application is fallible: points
//! mapped onto the horizon line of the transform have no finite image.

use nalgebra::{DMatrix, Matrix3, Point2, Vector3};

/// Row-major 3x3 projective transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Homography {
    pub h: [[f64; 3]; 3],
}

impl Homography {
    pub fn from_rows(h: [[f64; 3]; 3]) -> Self {
        Self { h }
    }

    /// Map a point through the transform.
    ///
    /// `None` when the projective denominator vanishes or the result is not
    /// finite.
    pub fn apply(&self, p: Point2<f64>) -> Option<Point2<f64>> {
        let w = self.h[2][0] * p.x + self.h[2][1] * p.y + self.h[2][2];
        if w.abs() < 1e-12 {
            return None;
        }
        let u = (self.h[0][0] * p.x + self.h[0][1] * p.y + self.h[0][2]) / w;
        let v = (self.h[1][0] * p.x + self.h[1][1] * p.y + self.h[1][2]) / w;
        if u.is_finite() && v.is_finite() {
            Some(Point2::new(u, v))
        } else {
            None
        }
    }

    pub fn inverse(&self) -> Option<Self> {
        let m = Matrix3::<f64>::from_row_slice(&[
            self.h[0][0],
            self.h[0][1],
            self.h[0][2],
            self.h[1][0],
            self.h[1][1],
            self.h[1][2],
            self.h[2][0],
            self.h[2][1],
            self.h[2][2],
        ]);
        m.try_inverse().map(|inv| Homography {
            h: [
                [inv[(0, 0)], inv[(0, 1)], inv[(0, 2)]],
                [inv[(1, 0)], inv[(1, 1)], inv[(1, 2)]],
                [inv[(2, 0)], inv[(2, 1)], inv[(2, 2)]],
            ],
        })
    }
}

// Hartley normalization: translate to centroid, scale so mean distance
// from it is sqrt(2).
fn normalize_points(pts: &[Point2<f64>; 4]) -> ([Point2<f64>; 4], Matrix3<f64>) {
    let n = pts.len() as f64;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for p in pts {
        cx += p.x;
        cy += p.y;
    }
    cx /= n;
    cy /= n;

    let mut mean_dist = 0.0;
    for p in pts {
        let dx = p.x - cx;
        let dy = p.y - cy;
        mean_dist += (dx * dx + dy * dy).sqrt();
    }
    mean_dist /= n;
    let s = if mean_dist > 1e-12 {
        (2.0_f64).sqrt() / mean_dist
    } else {
        1.0
    };

    let t = Matrix3::<f64>::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);

    let mut out = [Point2::origin(); 4];
    for (o, p) in out.iter_mut().zip(pts.iter()) {
        let v = t * Vector3::new(p.x, p.y, 1.0);
        *o = Point2::new(v[0], v[1]);
    }
    (out, t)
}

// True when any three of the four points span (close to) zero area,
// which also covers duplicated points. The threshold is relative to the
// overall point spread so pixel-scale and meter-scale inputs behave alike.
fn has_collinear_triple(pts: &[Point2<f64>; 4]) -> bool {
    let mut span: f64 = 0.0;
    for i in 0..4 {
        for j in i + 1..4 {
            span = span.max((pts[j] - pts[i]).norm_squared());
        }
    }
    if span < 1e-12 {
        return true;
    }
    for i in 0..4 {
        for j in i + 1..4 {
            for k in j + 1..4 {
                let ab = pts[j] - pts[i];
                let ac = pts[k] - pts[i];
                let cross = ab.x * ac.y - ab.y * ac.x;
                if cross.abs() < 1e-9 * span {
                    return true;
                }
            }
        }
    }
    false
}

/// Estimate `H` such that `dst ~ H * src` from four correspondences.
///
/// Returns `None` when either point set contains a collinear (or
/// duplicated) triple, or the linear system is otherwise singular; no
/// valid homography exists in that case and the points must be
/// re-collected.
pub fn estimate_homography(
    src: &[Point2<f64>; 4],
    dst: &[Point2<f64>; 4],
) -> Option<Homography> {
    if has_collinear_triple(src) || has_collinear_triple(dst) {
        return None;
    }

    let (s, ts) = normalize_points(src);
    let (d, td) = normalize_points(dst);

    // Build A (8 x 9, padded to 9 x 9).
    //
    // NOTE: nalgebra's SVD is "thin": V^T has only min(m, n) rows, so for
    // the minimal 4-point case the null-space vector is not included unless
    // m >= n. Padding with an all-zero row preserves the null-space.
    let mut a = DMatrix::<f64>::zeros(9, 9);

    for k in 0..4 {
        let x = s[k].x;
        let y = s[k].y;
        let u = d[k].x;
        let v = d[k].y;

        // [ -x -y -1   0  0  0   u*x u*y u ]
        a[(2 * k, 0)] = -x;
        a[(2 * k, 1)] = -y;
        a[(2 * k, 2)] = -1.0;
        a[(2 * k, 6)] = u * x;
        a[(2 * k, 7)] = u * y;
        a[(2 * k, 8)] = u;

        // [ 0  0  0  -x -y -1   v*x v*y v ]
        a[(2 * k + 1, 3)] = -x;
        a[(2 * k + 1, 4)] = -y;
        a[(2 * k + 1, 5)] = -1.0;
        a[(2 * k + 1, 6)] = v * x;
        a[(2 * k + 1, 7)] = v * y;
        a[(2 * k + 1, 8)] = v;
    }

    // Solve Ah = 0: h is the right singular vector with the smallest
    // singular value.
    let svd = a.svd(true, true);
    let vt = svd.v_t?;
    let last = vt.nrows().checked_sub(1)?;
    let h = vt.row(last);

    let hn =
        Matrix3::<f64>::from_row_slice(&[h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], h[8]]);

    // Denormalize: H = Td^{-1} * Hn * Ts.
    let td_inv = td.try_inverse()?;
    let h_den = td_inv * hn * ts;

    // Normalize so h[2][2] = 1.
    let scale = h_den[(2, 2)];
    if scale.abs() < 1e-12 {
        return None;
    }
    let h_den = h_den / scale;

    Some(Homography {
        h: [
            [h_den[(0, 0)], h_den[(0, 1)], h_den[(0, 2)]],
            [h_den[(1, 0)], h_den[(1, 1)], h_den[(1, 2)]],
            [h_den[(2, 0)], h_den[(2, 1)], h_den[(2, 2)]],
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general_quad() -> ([Point2<f64>; 4], [Point2<f64>; 4]) {
        let src = [
            Point2::new(100.0, 50.0),
            Point2::new(220.0, 60.0),
            Point2::new(240.0, 190.0),
            Point2::new(90.0, 170.0),
        ];
        // The source quad is irregular, so the mapping to the axis-aligned
        // square is projective, not affine.
        let dst = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        (src, dst)
    }

    #[test]
    fn maps_the_four_correspondences() {
        let (src, dst) = general_quad();
        let h = estimate_homography(&src, &dst).expect("homography");
        for (s, expected) in src.iter().zip(dst.iter()) {
            let got = h.apply(*s).expect("finite image");
            assert!(
                (got.x - expected.x).abs() < 1e-6 && (got.y - expected.y).abs() < 1e-6,
                "corner mismatch: got=({:.6},{:.6}) expected=({:.1},{:.1})",
                got.x,
                got.y,
                expected.x,
                expected.y
            );
        }
    }

    #[test]
    fn inverse_round_trips_interior_points() {
        let (src, dst) = general_quad();
        let h = estimate_homography(&src, &dst).expect("homography");
        let inv = h.inverse().expect("invertible");
        for p in [
            Point2::new(150.0, 100.0),
            Point2::new(120.0, 80.0),
            Point2::new(200.0, 150.0),
        ] {
            let back = inv.apply(h.apply(p).unwrap()).unwrap();
            assert!((back - p).norm() < 1e-3, "round trip drifted: {back:?} vs {p:?}");
        }
    }

    #[test]
    fn rejects_collinear_points() {
        let src = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(5.0, 7.0),
        ];
        let (_, dst) = general_quad();
        assert!(estimate_homography(&src, &dst).is_none());
    }

    #[test]
    fn rejects_duplicated_points() {
        let src = [
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(200.0, 30.0),
            Point2::new(150.0, 180.0),
        ];
        let (_, dst) = general_quad();
        assert!(estimate_homography(&src, &dst).is_none());
    }
}
