//! One-time four-point court calibration.
//!
//! [`CalibrationTransform`] pairs the four clicked pixel corners with the
//! court corners and stores both directions of the resulting homography.
//! The correspondence is positional and follows the fixed corner order
//! far-left, far-right, near-right, near-left (see
//! [`court::canonical_corners`]); supplying pixel points in any other order
//! solves without error but yields a silently wrong mapping, so callers
//! must preserve it.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::court;
use crate::error::CalibrationError;
use crate::homography::{estimate_homography, Homography};

/// Bidirectional pixel <-> court mapping built from four correspondences.
///
/// Read-only after a successful [`CalibrationTransform::build`]; both
/// directions are exact inverses of each other up to floating-point error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalibrationTransform {
    pixel_points: [Point2<f64>; 4],
    court_points: [Point2<f64>; 4],
    forward: Homography,
    inverse: Homography,
}

impl CalibrationTransform {
    /// Build the transform from four pixel corners and the four court
    /// corners they correspond to, in matching order.
    ///
    /// Fails with [`CalibrationError::DegenerateConfiguration`] when the
    /// points are collinear or duplicated; the caller must re-collect them.
    pub fn build(
        pixel_points: [Point2<f64>; 4],
        court_points: [Point2<f64>; 4],
    ) -> Result<Self, CalibrationError> {
        let forward = estimate_homography(&pixel_points, &court_points)
            .ok_or(CalibrationError::DegenerateConfiguration)?;
        let inverse = forward
            .inverse()
            .ok_or(CalibrationError::DegenerateConfiguration)?;
        Ok(Self {
            pixel_points,
            court_points,
            forward,
            inverse,
        })
    }

    /// Build against [`court::canonical_corners`]: pixel points must be the
    /// far-left, far-right, near-right, near-left singles corners, in that
    /// order.
    pub fn for_singles_court(pixel_points: [Point2<f64>; 4]) -> Result<Self, CalibrationError> {
        Self::build(pixel_points, court::canonical_corners())
    }

    /// Pixel coordinates to court meters.
    ///
    /// `None` for pixels on the horizon line of the calibration, where the
    /// court plane has no finite preimage.
    pub fn to_court(&self, pixel: Point2<f64>) -> Option<Point2<f64>> {
        self.forward.apply(pixel)
    }

    /// Court meters to pixel coordinates.
    pub fn to_pixel(&self, court: Point2<f64>) -> Option<Point2<f64>> {
        self.inverse.apply(court)
    }

    pub fn pixel_points(&self) -> &[Point2<f64>; 4] {
        &self.pixel_points
    }

    pub fn court_points(&self) -> &[Point2<f64>; 4] {
        &self.court_points
    }
}

/// Serialized calibration, as produced by the collaborating calibration UI.
///
/// The matrices are optional on load: records written by older tools carry
/// only the point pairs, in which case the homographies are recomputed.
/// When present they are trusted verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub pixel_points: [[f64; 2]; 4],
    pub court_points: [[f64; 2]; 4],
    #[serde(default)]
    pub forward_matrix: Option<[[f64; 3]; 3]>,
    #[serde(default)]
    pub inverse_matrix: Option<[[f64; 3]; 3]>,
}

impl CalibrationRecord {
    pub fn from_transform(transform: &CalibrationTransform) -> Self {
        Self {
            pixel_points: transform.pixel_points.map(|p| [p.x, p.y]),
            court_points: transform.court_points.map(|p| [p.x, p.y]),
            forward_matrix: Some(transform.forward.h),
            inverse_matrix: Some(transform.inverse.h),
        }
    }

    /// Rebuild the transform, recomputing the homographies when either
    /// matrix is missing from the record.
    pub fn into_transform(self) -> Result<CalibrationTransform, CalibrationError> {
        let pixel_points = self.pixel_points.map(|[x, y]| Point2::new(x, y));
        let court_points = self.court_points.map(|[x, y]| Point2::new(x, y));
        match (self.forward_matrix, self.inverse_matrix) {
            (Some(forward), Some(inverse)) => Ok(CalibrationTransform {
                pixel_points,
                court_points,
                forward: Homography::from_rows(forward),
                inverse: Homography::from_rows(inverse),
            }),
            _ => CalibrationTransform::build(pixel_points, court_points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A mild camera perspective: the far baseline is shorter on screen.
    fn court_view_pixels() -> [Point2<f64>; 4] {
        [
            Point2::new(420.0, 120.0),
            Point2::new(860.0, 120.0),
            Point2::new(1160.0, 660.0),
            Point2::new(120.0, 660.0),
        ]
    }

    #[test]
    fn corners_map_to_court_corners() {
        let transform = CalibrationTransform::for_singles_court(court_view_pixels()).unwrap();
        for (px, expected) in court_view_pixels()
            .iter()
            .zip(court::canonical_corners().iter())
        {
            let got = transform.to_court(*px).expect("finite");
            assert!(
                (got - *expected).norm() < 1e-6,
                "corner mapped to {got:?}, expected {expected:?}"
            );
        }
    }

    #[test]
    fn round_trip_stays_within_a_millipixel() {
        let transform = CalibrationTransform::for_singles_court(court_view_pixels()).unwrap();
        for px in [
            Point2::new(640.0, 400.0),
            Point2::new(500.0, 200.0),
            Point2::new(900.0, 600.0),
        ] {
            let court = transform.to_court(px).unwrap();
            let back = transform.to_pixel(court).unwrap();
            assert!(
                (back - px).norm() < 1e-3,
                "round trip drifted by {} px",
                (back - px).norm()
            );
        }
    }

    #[test]
    fn collinear_pixels_are_degenerate() {
        let pixels = [
            Point2::new(100.0, 100.0),
            Point2::new(200.0, 100.0),
            Point2::new(300.0, 100.0),
            Point2::new(400.0, 400.0),
        ];
        assert_eq!(
            CalibrationTransform::for_singles_court(pixels).unwrap_err(),
            CalibrationError::DegenerateConfiguration
        );
    }

    #[test]
    fn corner_order_is_positional() {
        // Swapping the two far corners still solves, but sends the
        // far-left pixel to the far-right court corner: the order contract
        // is on the caller.
        let mut swapped = court_view_pixels();
        swapped.swap(0, 1);
        let transform = CalibrationTransform::for_singles_court(swapped).unwrap();
        let got = transform.to_court(court_view_pixels()[0]).unwrap();
        let far_right = court::canonical_corners()[1];
        assert!((got - far_right).norm() < 1e-6);
    }

    #[test]
    fn record_without_matrices_recomputes_them() {
        let transform = CalibrationTransform::for_singles_court(court_view_pixels()).unwrap();
        let mut record = CalibrationRecord::from_transform(&transform);
        record.forward_matrix = None;
        record.inverse_matrix = None;
        let rebuilt = record.into_transform().unwrap();
        let px = Point2::new(700.0, 350.0);
        let a = transform.to_court(px).unwrap();
        let b = rebuilt.to_court(px).unwrap();
        assert!((a - b).norm() < 1e-9);
    }

    #[test]
    fn record_matrices_are_used_verbatim() {
        let transform = CalibrationTransform::for_singles_court(court_view_pixels()).unwrap();
        let mut record = CalibrationRecord::from_transform(&transform);
        // Tamper with the stored forward matrix; a verbatim load must
        // reflect the tampering rather than re-solve from the points.
        record.forward_matrix.as_mut().unwrap()[0][2] += 1.0;
        let rebuilt = record.into_transform().unwrap();
        let px = Point2::new(700.0, 350.0);
        let a = transform.to_court(px).unwrap();
        let b = rebuilt.to_court(px).unwrap();
        assert!((a - b).norm() > 1e-3);
    }

    #[test]
    fn record_survives_json() {
        let transform = CalibrationTransform::for_singles_court(court_view_pixels()).unwrap();
        let record = CalibrationRecord::from_transform(&transform);
        let json = serde_json::to_string(&record).unwrap();
        let loaded: CalibrationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, loaded);
    }
}
