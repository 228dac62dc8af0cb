use nalgebra::{Matrix3, Matrix3x4, Matrix4};
use std::env;
use std::path::Path;
use ttc_fusion::config::{load_config, FusionConfig};
use ttc_fusion::{
    Calibration, Frame, FusionPipeline, KeyPoint, KeypointMatch, LidarPoint, ObjectRegion, Rect,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // Demo: a lead vehicle closing from 10 m to 9.5 m within one frame
    // period. An optional JSON config path overrides params/calibration.
    let config = match env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => FusionConfig {
            calibration: demo_calibration(),
            ..Default::default()
        },
    };
    let pipeline = FusionPipeline::new(config.params, config.calibration)
        .map_err(|e| format!("Invalid parameters: {e}"))?;

    let (mut prev, mut curr, matches) = demo_frames(pipeline.calibration(), 10.0, 9.5);
    pipeline
        .prepare_frame(&mut prev)
        .map_err(|e| format!("Failed to prepare previous frame: {e}"))?;
    let report = pipeline
        .process(&prev, &mut curr, &matches)
        .map_err(|e| format!("Fusion failed: {e}"))?;

    println!("frame rate: {:.1} Hz", pipeline.params().frame_rate);
    report.print_text_summary();
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
    println!("\nJSON report:\n{json}");
    Ok(())
}

fn demo_calibration() -> Calibration {
    let projection = Matrix3x4::new(
        1000.0, 0.0, 620.0, 0.0, //
        0.0, 1000.0, 190.0, 0.0, //
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

fn rear_face(x: f64) -> Vec<LidarPoint> {
    let mut pts = Vec::new();
    for iz in 0..=20 {
        for iy in 0..=32 {
            pts.push(LidarPoint::new(
                x,
                -0.8 + 0.05 * iy as f64,
                -0.5 + 0.05 * iz as f64,
                0.5,
            ));
        }
    }
    pts
}

fn demo_frames(
    calibration: &Calibration,
    prev_x: f64,
    curr_x: f64,
) -> (Frame, Frame, Vec<KeypointMatch>) {
    let roi = Rect::new(500.0, 100.0, 240.0, 180.0);
    let mut prev = Frame {
        regions: vec![ObjectRegion::new(0, roi)],
        lidar_points: rear_face(prev_x),
        ..Default::default()
    };
    let mut curr = Frame {
        regions: vec![ObjectRegion::new(0, roi)],
        lidar_points: rear_face(curr_x),
        ..Default::default()
    };
    // Exhaust spray in front of the bumper.
    curr.lidar_points.push(LidarPoint::new(5.0, 0.1, 0.1, 0.9));

    let mut matches = Vec::new();
    for &z in &[-0.45, 0.0, 0.45] {
        for &y in &[-0.75, -0.375, 0.0, 0.375, 0.75] {
            let [u0, v0] = calibration.project(&LidarPoint::new(prev_x, y, z, 0.0));
            let [u1, v1] = calibration.project(&LidarPoint::new(curr_x, y, z, 0.0));
            matches.push(KeypointMatch::new(prev.keypoints.len(), curr.keypoints.len()));
            prev.keypoints.push(KeyPoint::new(u0, v0));
            curr.keypoints.push(KeyPoint::new(u1, v1));
        }
    }
    (prev, curr, matches)
}
