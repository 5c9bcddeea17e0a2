pub mod angle;
pub mod geo_vec2d;
#[cfg(test)]
mod tests;

pub use geo_vec2d::GeoVec2D;
