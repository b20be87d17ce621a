//! Main application module: capture loop, windows and keyboard handling.

use crate::{
    config::Config,
    constants::{READ_RETRY_BASE_MS, READ_RETRY_MAX_MS, VIDEO_WINDOW},
    controls::{read_scene_url, ControlPanel, KeyAction},
    detector::CascadeDetector,
    document_scene::DocumentScene,
    error::{Error, Result},
    overlay::{draw_overlay, overlay_lines},
    pipeline::{FramePipeline, TrackingContext},
    scene::SceneAdapter,
};
use log::{error, info, warn};
use opencv::{
    core::Mat,
    highgui::{self, WINDOW_NORMAL},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use std::time::{Duration, Instant};

/// Video source type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Camera index or video file path
    pub video_source: VideoSource,
    /// Run without any window
    pub headless: bool,
    /// Settings loaded from file and command line
    pub config: Config,
}

/// Main application struct
pub struct TrackingApp {
    config: AppConfig,
    video_capture: VideoCapture,
    pipeline: FramePipeline<CascadeDetector>,
    context: TrackingContext<DocumentScene>,
    controls: Option<ControlPanel>,
    overlays_visible: bool,
}

impl TrackingApp {
    /// Set up capture, detector and scene.
    ///
    /// Any failure here is fatal and reported to the caller.
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing face parallax application");
        config.config.validate()?;

        let video_capture = open_capture(&config)?;

        let settings = &config.config;
        let detector = CascadeDetector::new(&settings.detector.cascade, settings.detector.params)?;
        let pipeline = FramePipeline::new(detector);

        let scene = SceneAdapter::new(
            DocumentScene::new(),
            settings.scene.camera_id.clone(),
            settings.scene.lookup(),
        );
        let mut context = TrackingContext::new(settings.tracking.clone(), scene);
        context.reload_scene()?;

        let overlays_visible = settings.display.show_overlays && !config.headless;
        let controls = if config.headless {
            None
        } else {
            highgui::named_window(VIDEO_WINDOW, WINDOW_NORMAL)?;
            Some(ControlPanel::new(&context.params, overlays_visible)?)
        };

        Ok(Self {
            config,
            video_capture,
            pipeline,
            context,
            controls,
            overlays_visible,
        })
    }

    /// Run the main application loop until the source ends or the user quits.
    ///
    /// Per-frame failures are logged and the loop moves on to the next frame.
    pub fn run(&mut self) -> Result<()> {
        info!("Starting main application loop");

        let mut frame_count: u64 = 0;
        let mut fps = 0.0;
        let mut window_start = Instant::now();
        let mut window_frames: u64 = 0;
        let mut read_failures: u32 = 0;
        let frame_delay = self.config.config.display.frame_delay_ms;

        loop {
            let mut frame = Mat::default();
            let read_ok = frame_step("read frame", self.video_capture.read(&mut frame)).unwrap_or(false) && !frame.empty();
            if !read_ok {
                if matches!(self.config.video_source, VideoSource::File(_)) {
                    info!("End of video file reached");
                    break;
                }
                read_failures = read_failures.saturating_add(1);
                if read_failures == 1 {
                    warn!("Failed to read frame, retrying...");
                }
                std::thread::sleep(read_retry_delay(read_failures));
                continue;
            }
            if read_failures > 0 {
                info!("Capture recovered after {} failed reads", read_failures);
                read_failures = 0;
            }

            if self.config.config.display.mirror {
                let temp = frame.clone();
                frame_step("mirror frame", opencv::core::flip(&temp, &mut frame, 1));
            }

            let outcome = self.pipeline.tick(&mut frame, &mut self.context);

            frame_count += 1;
            window_frames += 1;
            if window_start.elapsed() >= Duration::from_secs(1) {
                fps = window_frames as f64 / window_start.elapsed().as_secs_f64();
                window_start = Instant::now();
                window_frames = 0;
            }

            if let Some(controls) = &mut self.controls {
                frame_step("read control panel", controls.sync(&mut self.context.params));
            }

            if self.config.headless {
                continue;
            }

            if self.overlays_visible {
                frame_step("draw overlay", draw_overlay(&mut frame, &overlay_lines(&outcome), fps));
                frame_step("display frame", highgui::imshow(VIDEO_WINDOW, &frame));
            }

            let key = frame_step("poll keyboard", highgui::wait_key(frame_delay)).unwrap_or(-1);
            match KeyAction::from_key(key) {
                Some(KeyAction::Quit) => {
                    info!("Exit requested by user");
                    break;
                }
                Some(KeyAction::ToggleOverlays) => {
                    frame_step("toggle overlays", self.toggle_overlays());
                }
                Some(KeyAction::ReloadScene) => self.reload_scene(),
                Some(KeyAction::EnterSceneUrl) => self.enter_scene_url(),
                None => {}
            }
        }

        info!("Processed {} frames, shutting down", frame_count);
        Ok(())
    }

    /// Show or hide the video window and control panel together
    fn toggle_overlays(&mut self) -> Result<()> {
        self.overlays_visible = !self.overlays_visible;
        info!("Overlays {}", if self.overlays_visible { "shown" } else { "hidden" });

        if let Some(controls) = &mut self.controls {
            if self.overlays_visible {
                controls.show(&self.context.params)?;
            } else {
                controls.hide()?;
            }
        }

        // Keep a small window around so keyboard input still reaches us
        if self.overlays_visible {
            highgui::resize_window(VIDEO_WINDOW, self.config.config.capture.width, self.config.config.capture.height)?;
        } else {
            highgui::resize_window(VIDEO_WINDOW, 1, 1)?;
        }
        Ok(())
    }

    /// Reload the configured scene; a failure leaves tracking paused
    fn reload_scene(&mut self) {
        match self.context.reload_scene() {
            Ok(()) => info!("Scene reloaded from {}", self.context.params.scene_url),
            Err(e) => error!("Scene reload failed, camera tracking paused: {}", e),
        }
    }

    /// Read a scene URL from the terminal and load it.
    ///
    /// Blocks the loop until a line is entered; a blank line keeps the
    /// current scene.
    fn enter_scene_url(&mut self) {
        eprint!("Scene URL [{}]: ", self.context.params.scene_url);
        let url = match read_scene_url(&mut std::io::stdin().lock()) {
            Ok(Some(url)) => url,
            Ok(None) => {
                info!("Scene URL unchanged");
                return;
            }
            Err(e) => {
                error!("Failed to read scene URL: {}", e);
                return;
            }
        };

        match self.context.load_scene_url(&url) {
            Ok(()) => info!("Scene loaded from {}", url),
            Err(e) => error!("Scene load failed, camera tracking paused: {}", e),
        }
    }
}

/// Log a failed per-frame step and carry on; the loop never stops on one
pub fn frame_step<T, E: std::fmt::Display>(step: &str, result: std::result::Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to {}: {}", step, e);
            None
        }
    }
}

/// Sleep before the next capture read after `failures` consecutive failures
#[must_use]
pub fn read_retry_delay(failures: u32) -> Duration {
    let shift = failures.saturating_sub(1).min(16);
    let millis = READ_RETRY_BASE_MS.saturating_mul(1 << shift).min(READ_RETRY_MAX_MS);
    Duration::from_millis(millis)
}

fn open_capture(config: &AppConfig) -> Result<VideoCapture> {
    let capture = &config.config.capture;

    let cap = match &config.video_source {
        VideoSource::Camera(index) => {
            info!("Opening camera {}", index);
            let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)?;

            cap.set(CAP_PROP_FRAME_WIDTH, f64::from(capture.width))?;
            cap.set(CAP_PROP_FRAME_HEIGHT, f64::from(capture.height))?;
            // Reduce buffer size for lower latency (webcam only)
            cap.set(CAP_PROP_BUFFERSIZE, 1.0)?;
            cap
        }
        VideoSource::File(path) => {
            info!("Opening video file: {}", path);
            VideoCapture::from_file(path, videoio::CAP_ANY)?
        }
    };

    if !cap.is_opened()? {
        return Err(Error::Capture(format!("Could not open video source {:?}", config.video_source)));
    }

    info!(
        "Capture opened at {}x{}",
        cap.get(CAP_PROP_FRAME_WIDTH)?,
        cap.get(CAP_PROP_FRAME_HEIGHT)?
    );
    Ok(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_step_failures_do_not_propagate() {
        let failed: opencv::Result<i32> = Err(opencv::Error::new(opencv::core::StsError, "no display"));
        assert_eq!(frame_step("poll keyboard", failed).unwrap_or(-1), -1);
        assert_eq!(KeyAction::from_key(-1), None);

        let shown: Result<()> = Err(Error::Render("window gone".to_string()));
        assert!(frame_step("display frame", shown).is_none());

        assert_eq!(frame_step::<_, Error>("read frame", Ok(true)), Some(true));
    }

    #[test]
    fn test_read_retry_delay_backs_off_and_caps() {
        assert_eq!(read_retry_delay(1), Duration::from_millis(READ_RETRY_BASE_MS));
        assert_eq!(read_retry_delay(2), Duration::from_millis(2 * READ_RETRY_BASE_MS));
        assert_eq!(read_retry_delay(3), Duration::from_millis(4 * READ_RETRY_BASE_MS));
        assert_eq!(read_retry_delay(40), Duration::from_millis(READ_RETRY_MAX_MS));
        assert_eq!(read_retry_delay(u32::MAX), Duration::from_millis(READ_RETRY_MAX_MS));
        assert!(read_retry_delay(0) > Duration::ZERO);
    }
}
