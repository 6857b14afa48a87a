use super::*;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const EPS: f64 = 1e-12;

fn reading(alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> OrientationReading {
    OrientationReading {
        alpha,
        beta,
        gamma,
        absolute: None,
    }
}

fn sample_with(orientation: OrientationReading) -> MotionSample {
    MotionSample {
        orientation: Some(orientation),
        ..MotionSample::default()
    }
}

#[test]
fn heading_maps_to_z_axis_only() {
    let target =
        RotationTarget::from_orientation(&reading(Some(90.0), Some(0.0), Some(0.0))).expect("target");
    assert!((target.z - FRAC_PI_2).abs() < EPS);
    assert_eq!(target.x, 0.0);
    assert_eq!(target.y, 0.0);

    let quat = target.to_quat();
    assert!(quat.x.abs() < EPS);
    assert!(quat.y.abs() < EPS);
    assert!((quat.z - FRAC_PI_4.sin()).abs() < EPS);
    assert!((quat.w - FRAC_PI_4.cos()).abs() < EPS);
}

#[test]
fn tilts_map_beta_to_x_and_gamma_to_y() {
    let target =
        RotationTarget::from_orientation(&reading(Some(0.0), Some(30.0), Some(-45.0))).expect("target");
    assert!((target.x - 30f64.to_radians()).abs() < EPS);
    assert!((target.y + 45f64.to_radians()).abs() < EPS);
    assert_eq!(target.z, 0.0);
}

#[test]
fn composition_is_z_then_x_then_y() {
    let target = RotationTarget {
        x: 0.4,
        y: -0.7,
        z: 1.1,
    };
    let expected =
        DQuat::from_rotation_z(1.1) * DQuat::from_rotation_x(0.4) * DQuat::from_rotation_y(-0.7);
    let xyz = DQuat::from_rotation_x(0.4) * DQuat::from_rotation_y(-0.7) * DQuat::from_rotation_z(1.1);

    let quat = target.to_quat();
    assert!(quat.abs_diff_eq(expected, EPS));
    assert!(!quat.abs_diff_eq(xyz, 1e-3));
}

#[test]
fn incomplete_orientation_keeps_previous_target() {
    let mut mapper = OrientationMapper::new();
    assert!(mapper.apply(Some(&sample_with(reading(Some(90.0), Some(10.0), Some(5.0))))));
    let before = mapper.target();

    assert!(!mapper.apply(Some(&sample_with(reading(None, None, None)))));
    assert!(!mapper.apply(Some(&sample_with(reading(Some(10.0), None, Some(1.0))))));
    assert!(!mapper.apply(Some(&MotionSample::default())));
    assert!(!mapper.apply(None));
    assert_eq!(mapper.target(), before);
}

#[test]
fn display_eases_fifteen_percent_per_frame() {
    let mut display = DisplayedRotation::new();
    let target = RotationTarget {
        x: 1.0,
        y: -2.0,
        z: 4.0,
    };

    let first = display.step(&target);
    assert!((first.x - 0.15).abs() < EPS);
    assert!((first.y + 0.30).abs() < EPS);
    assert!((first.z - 0.60).abs() < EPS);

    let second = display.step(&target);
    assert!((second.x - (0.15 + 0.85 * 0.15)).abs() < EPS);

    for _ in 0..200 {
        display.step(&target);
    }
    let settled = display.current();
    assert!((settled.x - target.x).abs() < 1e-9);
    assert!((settled.z - target.z).abs() < 1e-9);
}
