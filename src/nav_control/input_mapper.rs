use super::common::GeoVec2D;
use super::nav_config::NavConfig;
use regex::Regex;
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter};

/// Discrete control intent produced by a single key-down.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
pub enum ControlIntent {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    YawCameraLeft,
    YawCameraRight,
    YawAvatarLeft,
    YawAvatarRight,
    Jump,
    StartJourney,
    Unrecognized,
}

impl ControlIntent {
    pub fn is_translation(self) -> bool {
        matches!(
            self,
            ControlIntent::MoveForward
                | ControlIntent::MoveBackward
                | ControlIntent::StrafeLeft
                | ControlIntent::StrafeRight
        )
    }

    pub fn is_camera_yaw(self) -> bool {
        matches!(self, ControlIntent::YawCameraLeft | ControlIntent::YawCameraRight)
    }

    pub fn is_avatar_yaw(self) -> bool {
        matches!(self, ControlIntent::YawAvatarLeft | ControlIntent::YawAvatarRight)
    }

    /// Direction of a translation relative to the avatar's facing, counter-clockwise.
    fn relative_angle_deg(self) -> Option<f64> {
        match self {
            ControlIntent::MoveForward => Some(0.0),
            ControlIntent::StrafeLeft => Some(90.0),
            ControlIntent::MoveBackward => Some(180.0),
            ControlIntent::StrafeRight => Some(-90.0),
            _ => None,
        }
    }
}

/// Accepts a bare letter (`"w"`, `"W"`) as well as its physical key code (`"KeyW"`).
static LETTER_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Key)?([A-Za-z])$").unwrap());

/// Stateless translation of raw key identifiers into [`ControlIntent`]s.
///
/// Avatar yaw follows the planar convention of [`GeoVec2D`]: positive is
/// counter-clockwise, so "left" increases it. Camera heading follows map
/// convention (clockwise from north), so "left" decreases it.
pub struct InputMapper;

impl InputMapper {
    pub fn map_key(key: &str) -> ControlIntent {
        if let Some(letter) = LETTER_KEY_REGEX
            .captures(key)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next())
        {
            return Self::map_letter(letter.to_ascii_lowercase());
        }
        match key {
            "ArrowUp" | "Up" => ControlIntent::MoveForward,
            "ArrowDown" | "Down" => ControlIntent::MoveBackward,
            "ArrowLeft" | "Left" => ControlIntent::YawAvatarLeft,
            "ArrowRight" | "Right" => ControlIntent::YawAvatarRight,
            " " | "Space" | "Spacebar" => ControlIntent::Jump,
            "Enter" | "NumpadEnter" | "Return" => ControlIntent::StartJourney,
            _ => ControlIntent::Unrecognized,
        }
    }

    fn map_letter(letter: char) -> ControlIntent {
        match letter {
            'w' => ControlIntent::MoveForward,
            's' => ControlIntent::MoveBackward,
            'a' => ControlIntent::StrafeLeft,
            'd' => ControlIntent::StrafeRight,
            'q' => ControlIntent::YawCameraLeft,
            'e' => ControlIntent::YawCameraRight,
            'g' => ControlIntent::StartJourney,
            _ => ControlIntent::Unrecognized,
        }
    }

    /// Planar displacement for a translation intent, relative to the avatar's yaw.
    ///
    /// A unit step pointing east is rotated by `yaw + model_facing_offset_deg` plus the
    /// intent's own direction, then scaled to `move_step_deg`. With the default offset of
    /// 90 degrees, yaw zero faces north.
    pub fn movement_vector(intent: ControlIntent, yaw_deg: f64, cfg: &NavConfig) -> Option<GeoVec2D<f64>> {
        let relative = intent.relative_angle_deg()?;
        let unit = GeoVec2D::new(1.0, 0.0).rotated(yaw_deg + cfg.model_facing_offset_deg + relative);
        Some(unit * cfg.move_step_deg)
    }

    /// Avatar yaw change in degrees for an avatar yaw intent.
    pub fn avatar_yaw_delta(intent: ControlIntent, cfg: &NavConfig) -> Option<f64> {
        match intent {
            ControlIntent::YawAvatarLeft => Some(cfg.avatar_yaw_step_deg),
            ControlIntent::YawAvatarRight => Some(-cfg.avatar_yaw_step_deg),
            _ => None,
        }
    }

    /// Camera heading change in degrees for a camera yaw intent.
    pub fn camera_heading_delta(intent: ControlIntent, cfg: &NavConfig) -> Option<f64> {
        match intent {
            ControlIntent::YawCameraLeft => Some(-cfg.camera_yaw_step_deg),
            ControlIntent::YawCameraRight => Some(cfg.camera_yaw_step_deg),
            _ => None,
        }
    }
}
