//! Operator control panel and keyboard shortcuts.
//!
//! Sliders live in their own highgui window. Trackbars are integer valued,
//! so sensitivities use a step of 0.1 and smoothing a step of 0.01.

use crate::{
    constants::{
        CONTROLS_WINDOW, KEY_ENTER_SCENE_URL, KEY_ESCAPE, KEY_QUIT, KEY_RELOAD_SCENE, KEY_TOGGLE_OVERLAYS,
        SENSITIVITY_MAX, SMOOTHING_MAX,
    },
    params::TrackingParams,
    Result,
};
use log::{debug, info};
use opencv::highgui::{self, WINDOW_AUTOSIZE, WND_PROP_VISIBLE};
use std::io::BufRead;

const SENSITIVITY_STEPS: f64 = 10.0;
const SMOOTHING_STEPS: f64 = 100.0;

const TRACKBAR_X: &str = "Camera Position X";
const TRACKBAR_Y: &str = "Camera Position Y";
const TRACKBAR_Z: &str = "Camera Zoom";
const TRACKBAR_SMOOTHING: &str = "Movement Smoothing";

/// Slider position for a sensitivity value, clamped to the panel range
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn sensitivity_to_slider(value: f64) -> i32 {
    (value.clamp(0.0, SENSITIVITY_MAX) * SENSITIVITY_STEPS).round() as i32
}

/// Sensitivity value for a slider position
#[must_use]
pub fn slider_to_sensitivity(pos: i32) -> f64 {
    f64::from(pos) / SENSITIVITY_STEPS
}

/// Slider position for a smoothing factor, clamped to the panel range
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn smoothing_to_slider(value: f64) -> i32 {
    (value.clamp(0.0, SMOOTHING_MAX) * SMOOTHING_STEPS).round() as i32
}

/// Smoothing factor for a slider position
#[must_use]
pub fn slider_to_smoothing(pos: i32) -> f64 {
    f64::from(pos) / SMOOTHING_STEPS
}

#[allow(clippy::cast_possible_truncation)]
fn slider_max(range: f64, steps: f64) -> i32 {
    (range * steps).round() as i32
}

/// Keyboard action decoded from a `wait_key` result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Show or hide overlays and the control panel together
    ToggleOverlays,
    /// Reload the scene at the configured URL
    ReloadScene,
    /// Prompt for a new scene URL, then load it
    EnterSceneUrl,
    /// Leave the main loop
    Quit,
}

impl KeyAction {
    /// Decode a key code; `None` for unbound keys and timeouts
    #[must_use]
    pub fn from_key(key: i32) -> Option<Self> {
        if key < 0 {
            return None;
        }
        // Some backends report modifier bits above the low byte
        match key & 0xFF {
            KEY_TOGGLE_OVERLAYS => Some(Self::ToggleOverlays),
            KEY_RELOAD_SCENE => Some(Self::ReloadScene),
            KEY_ENTER_SCENE_URL => Some(Self::EnterSceneUrl),
            KEY_QUIT | KEY_ESCAPE => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Read one scene URL line from `input`.
///
/// Returns `None` at end of input or for a blank line, which keeps the
/// current URL.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn read_scene_url<B: BufRead>(input: &mut B) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let url = line.trim();
    Ok((!url.is_empty()).then(|| url.to_string()))
}

/// Whether a `WND_PROP_VISIBLE` reading means the window is still open.
///
/// Backends without the property report a negative value; only an
/// explicit 0 means the user closed the window.
#[must_use]
pub fn window_is_open(visible_property: f64) -> bool {
    !(0.0..1.0).contains(&visible_property)
}

/// Trackbar window bound to the tracking parameters
pub struct ControlPanel {
    visible: bool,
}

impl ControlPanel {
    /// Create the panel, shown or hidden
    ///
    /// # Errors
    ///
    /// Returns an error if the window or its trackbars cannot be created.
    pub fn new(params: &TrackingParams, visible: bool) -> Result<Self> {
        let mut panel = Self { visible: false };
        if visible {
            panel.show(params)?;
        }
        Ok(panel)
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open the window with sliders positioned from `params`
    ///
    /// # Errors
    ///
    /// Returns an error if the window or its trackbars cannot be created.
    pub fn show(&mut self, params: &TrackingParams) -> Result<()> {
        if self.visible {
            return Ok(());
        }

        highgui::named_window(CONTROLS_WINDOW, WINDOW_AUTOSIZE)?;

        let sensitivity_max = slider_max(SENSITIVITY_MAX, SENSITIVITY_STEPS);
        let sliders = [
            (TRACKBAR_X, sensitivity_max, sensitivity_to_slider(params.x_sensitivity)),
            (TRACKBAR_Y, sensitivity_max, sensitivity_to_slider(params.y_sensitivity)),
            (TRACKBAR_Z, sensitivity_max, sensitivity_to_slider(params.z_sensitivity)),
            (
                TRACKBAR_SMOOTHING,
                slider_max(SMOOTHING_MAX, SMOOTHING_STEPS),
                smoothing_to_slider(params.smoothing_factor),
            ),
        ];

        for (name, max, pos) in sliders {
            highgui::create_trackbar(name, CONTROLS_WINDOW, None, max, None)?;
            highgui::set_trackbar_pos(name, CONTROLS_WINDOW, pos)?;
        }

        self.visible = true;
        debug!("Control panel shown");
        Ok(())
    }

    /// Close the window; slider values already live in the parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be destroyed.
    pub fn hide(&mut self) -> Result<()> {
        if !self.visible {
            return Ok(());
        }
        highgui::destroy_window(CONTROLS_WINDOW)?;
        self.visible = false;
        debug!("Control panel hidden");
        Ok(())
    }

    /// Copy slider positions into the parameter set.
    ///
    /// A panel closed from the window manager is marked hidden and leaves
    /// the parameters untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a trackbar cannot be read.
    pub fn sync(&mut self, params: &mut TrackingParams) -> Result<()> {
        if !self.visible {
            return Ok(());
        }

        if !window_is_open(highgui::get_window_property(CONTROLS_WINDOW, WND_PROP_VISIBLE)?) {
            info!("Control panel closed, press 1 twice to reopen it");
            self.visible = false;
            return Ok(());
        }

        params.x_sensitivity = slider_to_sensitivity(highgui::get_trackbar_pos(TRACKBAR_X, CONTROLS_WINDOW)?);
        params.y_sensitivity = slider_to_sensitivity(highgui::get_trackbar_pos(TRACKBAR_Y, CONTROLS_WINDOW)?);
        params.z_sensitivity = slider_to_sensitivity(highgui::get_trackbar_pos(TRACKBAR_Z, CONTROLS_WINDOW)?);
        params.smoothing_factor =
            slider_to_smoothing(highgui::get_trackbar_pos(TRACKBAR_SMOOTHING, CONTROLS_WINDOW)?);
        Ok(())
    }
}
