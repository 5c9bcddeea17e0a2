use crate::warn;
use chrono::TimeDelta;
use std::{env, str::FromStr, time::Duration};
use strum_macros::Display;

/// Tunable constants of the navigation controller.
///
/// Speed and arrival threshold are empirically tuned for feel, none of the
/// values are load-bearing for correctness beyond the checks in [`NavConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavConfig {
    /// Route traversal speed in degrees per second.
    pub speed_deg_per_s: f64,
    /// Planar distance in degrees under which a waypoint counts as reached.
    pub arrival_epsilon_deg: f64,
    /// Total duration of one hop.
    pub jump_duration: TimeDelta,
    /// Peak height of one hop in metres, must not be negative.
    pub jump_amplitude: f64,
    /// Distance in degrees of one manual move keypress.
    pub move_step_deg: f64,
    /// Avatar yaw change per keypress in degrees.
    pub avatar_yaw_step_deg: f64,
    /// Camera heading change per keypress in degrees.
    pub camera_yaw_step_deg: f64,
    /// Offset between the avatar model's default facing and map yaw zero.
    pub model_facing_offset_deg: f64,
    pub follow_tilt: f64,
    pub follow_range: f64,
    pub follow_roll: f64,
    /// Derive the chase camera heading from the direction of travel.
    pub heading_follows_travel: bool,
    /// Refresh period of the frame driver.
    pub refresh_interval: Duration,
}

#[derive(Debug, Display)]
pub enum ConfigError {
    #[strum(to_string = "invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: &'static str },
}

impl std::error::Error for ConfigError {}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            speed_deg_per_s: 2.0e-5,
            arrival_epsilon_deg: 1.0e-5,
            jump_duration: TimeDelta::milliseconds(600),
            jump_amplitude: 3.0,
            move_step_deg: 1.0e-5,
            avatar_yaw_step_deg: 15.0,
            camera_yaw_step_deg: 10.0,
            model_facing_offset_deg: 90.0,
            follow_tilt: 45.0,
            follow_range: 150.0,
            follow_roll: 0.0,
            heading_follows_travel: false,
            refresh_interval: Duration::from_millis(16),
        }
    }
}

impl NavConfig {
    const SPEED_VAR: &'static str = "DUCK_SPEED";
    const EPSILON_VAR: &'static str = "DUCK_ARRIVAL_EPSILON";
    const JUMP_MS_VAR: &'static str = "DUCK_JUMP_DURATION_MS";
    const JUMP_AMP_VAR: &'static str = "DUCK_JUMP_AMPLITUDE";
    const MOVE_STEP_VAR: &'static str = "DUCK_MOVE_STEP";
    const AVATAR_YAW_VAR: &'static str = "DUCK_AVATAR_YAW_STEP";
    const CAMERA_YAW_VAR: &'static str = "DUCK_CAMERA_YAW_STEP";
    const FACING_OFFSET_VAR: &'static str = "DUCK_MODEL_FACING_OFFSET";
    const TILT_VAR: &'static str = "DUCK_FOLLOW_TILT";
    const RANGE_VAR: &'static str = "DUCK_FOLLOW_RANGE";
    const ROLL_VAR: &'static str = "DUCK_FOLLOW_ROLL";
    const HEADING_VAR: &'static str = "DUCK_HEADING_FOLLOWS_TRAVEL";
    const REFRESH_MS_VAR: &'static str = "DUCK_REFRESH_MS";

    /// Builds a configuration from the defaults, overridden by any `DUCK_*`
    /// environment variable that is set and parses.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        Self::override_from_env(Self::SPEED_VAR, &mut cfg.speed_deg_per_s);
        Self::override_from_env(Self::EPSILON_VAR, &mut cfg.arrival_epsilon_deg);
        Self::override_from_env(Self::JUMP_AMP_VAR, &mut cfg.jump_amplitude);
        Self::override_from_env(Self::MOVE_STEP_VAR, &mut cfg.move_step_deg);
        Self::override_from_env(Self::AVATAR_YAW_VAR, &mut cfg.avatar_yaw_step_deg);
        Self::override_from_env(Self::CAMERA_YAW_VAR, &mut cfg.camera_yaw_step_deg);
        Self::override_from_env(Self::FACING_OFFSET_VAR, &mut cfg.model_facing_offset_deg);
        Self::override_from_env(Self::TILT_VAR, &mut cfg.follow_tilt);
        Self::override_from_env(Self::RANGE_VAR, &mut cfg.follow_range);
        Self::override_from_env(Self::ROLL_VAR, &mut cfg.follow_roll);
        Self::override_from_env(Self::HEADING_VAR, &mut cfg.heading_follows_travel);

        let mut jump_ms = cfg.jump_duration.num_milliseconds();
        Self::override_from_env(Self::JUMP_MS_VAR, &mut jump_ms);
        match TimeDelta::try_milliseconds(jump_ms) {
            Some(duration) => cfg.jump_duration = duration,
            None => warn!("Ignoring {}={jump_ms}, out of range, keeping default.", Self::JUMP_MS_VAR),
        }

        let mut refresh_ms = u64::try_from(cfg.refresh_interval.as_millis()).unwrap_or(16);
        Self::override_from_env(Self::REFRESH_MS_VAR, &mut refresh_ms);
        cfg.refresh_interval = Duration::from_millis(refresh_ms);
        cfg
    }

    fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
        if let Ok(raw) = env::var(key) {
            match raw.trim().parse::<T>() {
                Ok(val) => *target = val,
                Err(_) => warn!("Ignoring {key}={raw}, keeping default."),
            }
        }
    }

    /// Checks the physical sanity of the configuration.
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |key, val: f64| {
            if val.is_finite() && val > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { key, reason: "must be finite and positive" })
            }
        };
        let finite = |key, val: f64| {
            if val.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { key, reason: "must be finite" })
            }
        };
        positive("speed_deg_per_s", self.speed_deg_per_s)?;
        positive("arrival_epsilon_deg", self.arrival_epsilon_deg)?;
        if self.jump_duration <= TimeDelta::zero() {
            return Err(ConfigError::InvalidValue { key: "jump_duration", reason: "must be positive" });
        }
        if !(self.jump_amplitude.is_finite() && self.jump_amplitude >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "jump_amplitude",
                reason: "must be finite and not negative",
            });
        }
        finite("move_step_deg", self.move_step_deg)?;
        finite("avatar_yaw_step_deg", self.avatar_yaw_step_deg)?;
        finite("camera_yaw_step_deg", self.camera_yaw_step_deg)?;
        finite("model_facing_offset_deg", self.model_facing_offset_deg)?;
        finite("follow_tilt", self.follow_tilt)?;
        finite("follow_range", self.follow_range)?;
        finite("follow_roll", self.follow_roll)?;
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::InvalidValue { key: "refresh_interval", reason: "must be positive" });
        }
        Ok(())
    }
}
