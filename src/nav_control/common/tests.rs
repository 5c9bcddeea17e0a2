use super::{angle::wrap_degrees, geo_vec2d::GeoVec2D};

const TOL: f64 = 1e-12;

#[test]
fn test_lat_lng_axes() {
    let v = GeoVec2D::<f64>::from_lat_lng(40.7128, -74.0060);
    assert_eq!(v.lat(), 40.7128);
    assert_eq!(v.lng(), -74.0060);
    assert_eq!(v, GeoVec2D::new(-74.0060, 40.7128));
}

#[test]
fn test_distance_and_direction() {
    let a = GeoVec2D::<f64>::from_lat_lng(0.0, 0.0);
    let b = GeoVec2D::<f64>::from_lat_lng(3.0, 4.0);
    assert!((a.euclid_distance(&b) - 5.0).abs() < TOL);
    assert!((a.to(&b).abs() - 5.0).abs() < TOL);
    let scaled = a.to(&b) * 2.0;
    assert!((scaled.abs() - 10.0).abs() < TOL);
}

#[test]
fn test_lerp_towards_hits_target_exactly() {
    let a = GeoVec2D::<f64>::from_lat_lng(0.0, 0.0);
    let b = GeoVec2D::<f64>::from_lat_lng(0.1, 0.3);
    assert_eq!(a.lerp_towards(&b, 1.0), b);
    assert_eq!(a.lerp_towards(&b, 7.5), b);
    assert_eq!(a.lerp_towards(&b, -1.0), a);
    let half = a.lerp_towards(&b, 0.5);
    assert!((half.lat() - 0.05).abs() < TOL);
    assert!((half.lng() - 0.15).abs() < TOL);
}

#[test]
fn test_rotation_is_counter_clockwise() {
    let east = GeoVec2D::<f64>::new(1.0, 0.0);
    let north = east.rotated(90.0);
    assert!(north.lng().abs() < TOL);
    assert!((north.lat() - 1.0).abs() < TOL);
    let mut back = north;
    back.rotate_by(-90.0);
    assert!((back.lng() - 1.0).abs() < TOL);
    assert!(back.lat().abs() < TOL);
}

#[test]
fn test_bearing() {
    let north = GeoVec2D::<f64>::from_lat_lng(1.0, 0.0);
    let east = GeoVec2D::<f64>::from_lat_lng(0.0, 1.0);
    let west = GeoVec2D::<f64>::from_lat_lng(0.0, -1.0);
    assert!(north.bearing_deg().unwrap().abs() < TOL);
    assert!((east.bearing_deg().unwrap() - 90.0).abs() < TOL);
    assert!((west.bearing_deg().unwrap() - 270.0).abs() < TOL);
    assert_eq!(GeoVec2D::<f64>::default().bearing_deg(), None);
}

#[test]
fn test_wrap_degrees() {
    assert_eq!(wrap_degrees(0.0), 0.0);
    assert_eq!(wrap_degrees(360.0), 0.0);
    assert_eq!(wrap_degrees(-90.0), 270.0);
    assert_eq!(wrap_degrees(725.0), 5.0);
    let tiny = wrap_degrees(-1e-20);
    assert!((0.0..360.0).contains(&tiny));
}
