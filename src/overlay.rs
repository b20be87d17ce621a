//! Debug overlay text describing the tracked face and camera.

use crate::{camera::Projection, pipeline::FrameOutcome, Result};
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
};

/// Shown when the detector found nothing this frame
pub const NO_FACE_TEXT: &str = "No face detected";

const LINE_HEIGHT: i32 = 18;
const TEXT_SCALE: f64 = 0.5;

/// Lines of the debug overlay for a frame outcome
#[must_use]
pub fn overlay_lines(outcome: &FrameOutcome) -> Vec<String> {
    if !outcome.face_detected() {
        return vec![NO_FACE_TEXT.to_string()];
    }

    let Some(update) = &outcome.update else {
        return vec!["Face detected, no camera to drive".to_string()];
    };

    let obs = &update.observation;
    let mut lines = vec![
        "Face Tracking Info:".to_string(),
        format!("X: {:.2}", obs.normalized_x),
        format!("Y: {:.2}", obs.normalized_y),
        format!("Size: {:.2}", obs.face_size_ratio),
        "Camera Info:".to_string(),
        format!("Type: {}", update.projection),
        format!("X: {:.2}", update.position.x),
        format!("Y: {:.2}", update.position.y),
    ];

    match update.projection {
        Projection::Orthographic => lines.push(format!("Zoom: {:.2}", update.zoom.unwrap_or(1.0))),
        Projection::Perspective => lines.push(format!("Z: {:.2}", update.position.z)),
    }

    lines.push("Scene Info:".to_string());
    lines.push(format!("Camera ID: {}", update.camera_id));
    lines
}

/// Draw overlay lines and the frame rate in the top-left corner
///
/// # Errors
///
/// Returns an error if drawing fails.
pub fn draw_overlay(frame: &mut Mat, lines: &[String], fps: f64) -> Result<()> {
    let color = Scalar::new(0.0, 255.0, 0.0, 0.0);

    imgproc::put_text(
        frame,
        &format!("FPS: {fps:.1}"),
        Point::new(10, 24),
        FONT_HERSHEY_SIMPLEX,
        0.7,
        color,
        2,
        LINE_8,
        false,
    )?;

    let mut y = 24 + LINE_HEIGHT + 8;
    for line in lines {
        imgproc::put_text(
            frame,
            line,
            Point::new(10, y),
            FONT_HERSHEY_SIMPLEX,
            TEXT_SCALE,
            color,
            1,
            LINE_8,
            false,
        )?;
        y += LINE_HEIGHT;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{camera::Vec3, mapper::CameraUpdate, observation::{FaceObservation, FaceRect}};

    fn outcome(projection: Projection) -> FrameOutcome {
        FrameOutcome {
            detections: 1,
            face: Some(FaceRect::new(270, 190, 100, 100)),
            update: Some(CameraUpdate {
                observation: FaceObservation {
                    normalized_x: 0.0,
                    normalized_y: -0.25,
                    face_size_ratio: 0.156_25,
                },
                projection,
                camera_id: "cam".to_string(),
                position: Vec3::new(1.234, -5.0, 300.0),
                zoom: Some(1.5),
            }),
        }
    }

    #[test]
    fn test_no_face_line() {
        assert_eq!(overlay_lines(&FrameOutcome::default()), vec![NO_FACE_TEXT.to_string()]);
    }

    #[test]
    fn test_orthographic_lines() {
        let lines = overlay_lines(&outcome(Projection::Orthographic));
        assert!(lines.contains(&"Y: -0.25".to_string()));
        assert!(lines.contains(&"Size: 0.16".to_string()));
        assert!(lines.contains(&"Type: Orthographic".to_string()));
        assert!(lines.contains(&"X: 1.23".to_string()));
        assert!(lines.contains(&"Zoom: 1.50".to_string()));
        assert!(lines.contains(&"Camera ID: cam".to_string()));
    }

    #[test]
    fn test_perspective_lines_show_depth() {
        let lines = overlay_lines(&outcome(Projection::Perspective));
        assert!(lines.contains(&"Type: Perspective".to_string()));
        assert!(lines.contains(&"Z: 300.00".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Zoom")));
    }
}
