use super::common::{GeoVec2D, angle::wrap_degrees};
use super::route::Waypoint;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Geographic position of the avatar, altitude in metres above the map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

impl Position {
    pub fn planar(&self) -> GeoVec2D<f64> { GeoVec2D::from_lat_lng(self.lat, self.lng) }

    pub fn set_planar(&mut self, planar: GeoVec2D<f64>) {
        self.lat = planar.lat();
        self.lng = planar.lng();
    }
}

/// Orientation in degrees, every component wrapped into `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Orientation {
    yaw: f64,
    pitch: f64,
    roll: f64,
}

impl Orientation {
    pub fn yaw(&self) -> f64 { self.yaw }
    pub fn pitch(&self) -> f64 { self.pitch }
    pub fn roll(&self) -> f64 { self.roll }
    pub fn add_yaw(&mut self, delta_deg: f64) { self.yaw = wrap_degrees(self.yaw + delta_deg); }
}

/// Full avatar state: position, orientation and jump bookkeeping.
///
/// Field ownership while the controller runs:
/// - lat/lng belong to route traversal (or manual moves while no journey is active),
/// - altitude, `is_jumping` and `base_altitude` belong to the jump controller,
/// - orientation belongs to the keyboard path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Pose {
    pub position: Position,
    pub orientation: Orientation,
    pub(crate) is_jumping: bool,
    pub(crate) base_altitude: f64,
}

impl Pose {
    /// A fresh pose standing on `waypoint` at ground level, facing the default direction.
    pub fn anchored_at(waypoint: &Waypoint) -> Self {
        Self {
            position: Position { lat: waypoint.latitude(), lng: waypoint.longitude(), altitude: 0.0 },
            ..Self::default()
        }
    }

    pub fn is_jumping(&self) -> bool { self.is_jumping }
    pub fn base_altitude(&self) -> f64 { self.base_altitude }
}

impl Display for Pose {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} alt {:.2}m, yaw/pitch/roll {:.1}/{:.1}/{:.1}deg",
            self.position.planar(),
            self.position.altitude,
            self.orientation.yaw(),
            self.orientation.pitch(),
            self.orientation.roll(),
        )?;
        if self.is_jumping {
            write!(f, " (jumping from {:.2}m)", self.base_altitude())?;
        }
        Ok(())
    }
}
