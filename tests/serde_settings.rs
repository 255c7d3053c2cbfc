#![cfg(feature = "serde")]

use pointmass::{Obb, Plane, Settings, Vec3};

#[test]
fn settings_load_from_json_with_defaults() {
    let json = r#"{ "time_step": 0.01, "iterations": 6 }"#;
    let settings: Settings<f32> = serde_json::from_str(json).unwrap();
    assert_eq!(settings.time_step, 0.01);
    assert_eq!(settings.iterations, 6);
    assert_eq!(settings.gravity, Vec3::new(0.0, -9.81, 0.0));
    assert_eq!(settings.max_substeps, None);
    assert!(settings.validate().is_ok());
}

#[test]
fn primitives_survive_a_round_trip() {
    let plane = Plane::ground(1.5f64).with_restitution(0.25);
    let obb = Obb::rotated_y(Vec3::new(1.0f64, 2.0, 3.0), Vec3::new(0.5, 0.5, 2.0), 0.4);

    let plane_back: Plane<f64> = serde_json::from_str(&serde_json::to_string(&plane).unwrap()).unwrap();
    let obb_back: Obb<f64> = serde_json::from_str(&serde_json::to_string(&obb).unwrap()).unwrap();
    assert_eq!(plane_back, plane);
    assert_eq!(obb_back, obb);
}
