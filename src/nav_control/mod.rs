pub mod camera_follow;
pub mod common;
pub mod frame_driver;
pub mod input_mapper;
pub mod jump_controller;
pub mod nav_config;
pub mod pose;
pub mod route;
pub mod scheduler;
pub mod traversal;

pub use camera_follow::{CameraFollow, CameraMode, CameraState};
pub use frame_driver::{DriverInput, FrameDriver};
pub use input_mapper::{ControlIntent, InputMapper};
pub use jump_controller::JumpController;
pub use nav_config::{ConfigError, NavConfig};
pub use pose::{Orientation, Pose, Position};
pub use route::{Route, RouteBook, RouteError, Waypoint};
pub use scheduler::{AnimationScheduler, Frame, NavEvent};
pub use traversal::{RouteTraversal, TraversalState};
