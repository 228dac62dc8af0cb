//! Camera/range calibration and point projection.
//!
//! A range point `X` (homogeneous, sensor frame) maps to image coordinates
//! through `P · R · T · X`, where `T` is the range-to-camera extrinsic, `R`
//! the rectifying rotation lifted to 4×4, and `P` the rectified projection.
//! Pixel coordinates are obtained by dividing by the third (depth) component.
use crate::types::LidarPoint;
use nalgebra::{Matrix3, Matrix3x4, Matrix4, Vector3, Vector4};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    /// Rectified projection matrix (3×4).
    pub projection: Matrix3x4<f64>,
    /// Rectifying rotation (3×3).
    pub rectification: Matrix3<f64>,
    /// Range sensor to camera transform (4×4).
    pub extrinsic: Matrix4<f64>,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            projection: Matrix3x4::identity(),
            rectification: Matrix3::identity(),
            extrinsic: Matrix4::identity(),
        }
    }
}

impl Calibration {
    pub fn new(
        projection: Matrix3x4<f64>,
        rectification: Matrix3<f64>,
        extrinsic: Matrix4<f64>,
    ) -> Self {
        Self {
            projection,
            rectification,
            extrinsic,
        }
    }

    /// Rectification embedded in the upper-left block of a 4×4 identity.
    pub fn rectification_4x4(&self) -> Matrix4<f64> {
        let mut r = Matrix4::identity();
        r.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rectification);
        r
    }

    /// Composite `P · R · T` mapping homogeneous sensor points to the image.
    pub fn composite(&self) -> Matrix3x4<f64> {
        self.projection * self.rectification_4x4() * self.extrinsic
    }

    /// Homogeneous image coordinates of `p` (before the depth divide).
    pub fn project_homogeneous(&self, p: &LidarPoint) -> Vector3<f64> {
        self.composite() * Vector4::new(p.x, p.y, p.z, 1.0)
    }

    /// Pixel coordinates of `p`. Points on the camera plane produce
    /// non-finite coordinates, which no region contains.
    pub fn project(&self, p: &LidarPoint) -> [f64; 2] {
        project_with(&self.composite(), p)
    }
}

/// Project with a precomputed composite matrix.
#[inline]
pub fn project_with(composite: &Matrix3x4<f64>, p: &LidarPoint) -> [f64; 2] {
    let y = composite * Vector4::new(p.x, p.y, p.z, 1.0);
    [y[0] / y[2], y[1] / y[2]]
}
