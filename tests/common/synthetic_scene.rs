use nalgebra::{Matrix3, Matrix3x4, Matrix4};
use ttc_fusion::{Calibration, Frame, KeyPoint, KeypointMatch, LidarPoint, ObjectRegion, Rect};

pub const FOCAL: f64 = 1000.0;
pub const CX: f64 = 620.0;
pub const CY: f64 = 190.0;

pub const MAIN_PREV_ID: u32 = 1;
pub const SIDE_PREV_ID: u32 = 2;
pub const LONELY_PREV_ID: u32 = 9;
pub const MAIN_CURR_ID: u32 = 11;
pub const SIDE_CURR_ID: u32 = 12;

/// Pinhole camera looking along +x of the range sensor.
pub fn forward_calibration() -> Calibration {
    let projection = Matrix3x4::new(
        FOCAL, 0.0, CX, 0.0, //
        0.0, FOCAL, CY, 0.0, //
        0.0, 0.0, 1.0, 0.0,
    );
    let extrinsic = Matrix4::new(
        0.0, -1.0, 0.0, 0.0, //
        0.0, 0.0, -1.0, 0.0, //
        1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );
    Calibration::new(projection, Matrix3::identity(), extrinsic)
}

pub fn project(x: f64, y: f64, z: f64) -> KeyPoint {
    KeyPoint::new(CX - FOCAL * y / x, CY - FOCAL * z / x)
}

/// Dense vertical plane of returns at forward distance `x`.
pub fn plane(x: f64, y0: f64, y1: f64, z0: f64, z1: f64, step: f64) -> Vec<LidarPoint> {
    let ny = ((y1 - y0) / step).round() as usize;
    let nz = ((z1 - z0) / step).round() as usize;
    let mut pts = Vec::with_capacity((ny + 1) * (nz + 1));
    for iz in 0..=nz {
        for iy in 0..=ny {
            pts.push(LidarPoint::new(
                x,
                y0 + step * iy as f64,
                z0 + step * iz as f64,
                0.5,
            ));
        }
    }
    pts
}

/// Two frames of a scene with:
/// - a vehicle ahead in the ego lane closing from `prev_x` to `curr_x`;
/// - a static vehicle in the neighbouring lane at 15 m;
/// - a previous-frame region that no match reaches.
///
/// The current frame also holds one stray return in front of the lead
/// vehicle and one grossly mismatched keypoint pair on it.
pub struct Scene {
    pub prev: Frame,
    pub curr: Frame,
    pub matches: Vec<KeypointMatch>,
    pub calibration: Calibration,
}

pub fn closing_scene(prev_x: f64, curr_x: f64) -> Scene {
    let main_roi = Rect::new(500.0, 100.0, 240.0, 180.0);
    let side_roi = Rect::new(290.0, 120.0, 130.0, 140.0);
    let lonely_roi = Rect::new(1000.0, 300.0, 80.0, 60.0);

    let mut prev = Frame {
        regions: vec![
            ObjectRegion::new(MAIN_PREV_ID, main_roi),
            ObjectRegion::new(SIDE_PREV_ID, side_roi),
            ObjectRegion::new(LONELY_PREV_ID, lonely_roi),
        ],
        ..Default::default()
    };
    let mut curr = Frame {
        regions: vec![
            ObjectRegion::new(MAIN_CURR_ID, main_roi),
            ObjectRegion::new(SIDE_CURR_ID, side_roi),
        ],
        ..Default::default()
    };

    prev.lidar_points = plane(prev_x, -0.8, 0.8, -0.5, 0.5, 0.05);
    prev.lidar_points
        .extend(plane(15.0, 3.4, 4.6, -0.5, 0.5, 0.1));
    curr.lidar_points = plane(curr_x, -0.8, 0.8, -0.5, 0.5, 0.05);
    curr.lidar_points
        .extend(plane(15.0, 3.4, 4.6, -0.5, 0.5, 0.1));
    curr.lidar_points.push(LidarPoint::new(5.0, 0.1, 0.1, 0.9));

    let mut matches = Vec::new();
    let mut add = |prev_kp: KeyPoint, curr_kp: KeyPoint| {
        matches.push(KeypointMatch::new(prev.keypoints.len(), curr.keypoints.len()));
        prev.keypoints.push(prev_kp);
        curr.keypoints.push(curr_kp);
    };
    for &z in &[-0.45, 0.0, 0.45] {
        for &y in &[-0.75, -0.375, 0.0, 0.375, 0.75] {
            add(project(prev_x, y, z), project(curr_x, y, z));
        }
    }
    for &z in &[-0.3, 0.3] {
        for &y in &[3.5, 4.0, 4.5] {
            add(project(15.0, y, z), project(15.0, y, z));
        }
    }
    add(KeyPoint::new(600.0, 200.0), KeyPoint::new(640.0, 200.0));

    Scene {
        prev,
        curr,
        matches,
        calibration: forward_calibration(),
    }
}
