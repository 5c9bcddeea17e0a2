use super::common::angle::wrap_degrees;
use super::input_mapper::{ControlIntent, InputMapper};
use super::nav_config::NavConfig;
use super::pose::Pose;
use crate::nav;
use serde::Serialize;
use strum_macros::Display;

/// Initial map view: looking north, tilted by 45 degrees.
const DEFAULT_HEADING: f64 = 0.0;
const DEFAULT_TILT: f64 = 45.0;

/// Camera parameters handed to the renderer each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraState {
    pub center_lat: f64,
    pub center_lng: f64,
    pub tilt: f64,
    pub range: f64,
    pub heading: f64,
    pub roll: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum CameraMode {
    /// Chase camera slaved to the avatar while a journey runs.
    Follow,
    /// Heading driven by keyboard intents.
    Manual,
}

/// Chase camera that switches between following the avatar and manual control.
#[derive(Debug)]
pub struct CameraFollow {
    state: CameraState,
    mode: CameraMode,
}

impl CameraFollow {
    pub fn new(pose: &Pose, cfg: &NavConfig) -> Self {
        Self {
            state: CameraState {
                center_lat: pose.position.lat,
                center_lng: pose.position.lng,
                tilt: DEFAULT_TILT,
                range: cfg.follow_range,
                heading: DEFAULT_HEADING,
                roll: 0.0,
            },
            mode: CameraMode::Manual,
        }
    }

    pub fn state(&self) -> CameraState { self.state }
    pub fn mode(&self) -> CameraMode { self.mode }

    /// Switches between follow and manual mode to match the traversal state.
    pub fn sync_mode(&mut self, traversal_active: bool) {
        let wanted = if traversal_active { CameraMode::Follow } else { CameraMode::Manual };
        if wanted != self.mode {
            nav!("Camera switched from {} to {wanted}.", self.mode);
            self.mode = wanted;
        }
    }

    /// Re-derives the chase camera from the pose. No-op outside follow mode.
    ///
    /// `travel_bearing` is the clockwise-from-north direction of travel, used as
    /// heading when `heading_follows_travel` is enabled.
    pub fn follow(&mut self, pose: &Pose, travel_bearing: Option<f64>, cfg: &NavConfig) {
        if self.mode != CameraMode::Follow {
            return;
        }
        self.state.center_lat = pose.position.lat;
        self.state.center_lng = pose.position.lng;
        self.state.tilt = cfg.follow_tilt;
        self.state.range = cfg.follow_range;
        self.state.roll = cfg.follow_roll;
        if cfg.heading_follows_travel {
            if let Some(bearing) = travel_bearing {
                self.state.heading = wrap_degrees(bearing);
            }
        }
    }

    /// Applies a camera yaw intent. Returns `false` if the intent is not a camera
    /// yaw or the camera is currently following the avatar.
    pub fn apply_intent(&mut self, intent: ControlIntent, cfg: &NavConfig) -> bool {
        if self.mode != CameraMode::Manual {
            return false;
        }
        let Some(delta) = InputMapper::camera_heading_delta(intent, cfg) else {
            return false;
        };
        self.state.heading = wrap_degrees(self.state.heading + delta);
        true
    }

    /// Keeps the manual camera centered on the avatar after a manual move.
    pub fn recenter(&mut self, pose: &Pose) {
        self.state.center_lat = pose.position.lat;
        self.state.center_lng = pose.position.lng;
    }

    /// Returns to the initial view around `pose`.
    pub fn reset(&mut self, pose: &Pose, cfg: &NavConfig) { *self = Self::new(pose, cfg); }
}
