use thiserror::Error;

/// Errors produced while building or requesting the court calibration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum CalibrationError {
    /// The four pixel points are collinear or duplicated; no valid
    /// homography exists and the points must be re-collected.
    #[error("the four calibration points are collinear or duplicated")]
    DegenerateConfiguration,

    /// A coordinate transform was requested before calibration completed.
    /// Recoverable: skip the court-coordinate computation for that frame.
    #[error("coordinate transform requested before calibration")]
    NotCalibrated,
}
