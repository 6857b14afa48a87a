use crate::domain::{MotionSample, OrientationReading, SessionEntry, SessionId};
use serde_json::json;

#[test]
fn empty_session_id_is_rejected() {
    assert!(SessionId::parse("").is_none());
    assert_eq!(SessionId::parse(" ").map(|s| s.to_string()), Some(" ".into()));
}

#[test]
fn generated_session_ids_are_distinct() {
    assert_ne!(SessionId::generate(), SessionId::generate());
}

#[test]
fn sample_keeps_zero_apart_from_missing_axis() {
    let sample: MotionSample = serde_json::from_value(json!({
        "orientation": { "alpha": 0.0, "beta": null, "gamma": 12.5 },
        "rotationRate": null,
        "interval": 16
    }))
    .expect("sample");

    let orientation = sample.orientation.expect("orientation");
    assert_eq!(orientation.alpha, Some(0.0));
    assert_eq!(orientation.beta, None);
    assert_eq!(orientation.gamma, Some(12.5));
    assert_eq!(orientation.absolute, None);
    assert!(sample.rotation_rate.is_none());
    assert!(sample.acceleration_including_gravity.is_none());
    assert_eq!(sample.interval, Some(16.0));
}

#[test]
fn sample_serializes_absent_fields_as_null() {
    let sample = MotionSample {
        orientation: Some(OrientationReading {
            alpha: Some(1.0),
            ..OrientationReading::default()
        }),
        ..MotionSample::default()
    };
    let value = serde_json::to_value(sample).expect("json");
    assert_eq!(
        value,
        json!({
            "orientation": { "alpha": 1.0, "beta": null, "gamma": null, "absolute": null },
            "rotationRate": null,
            "acceleration": null,
            "accelerationIncludingGravity": null,
            "interval": null
        })
    );
}

#[test]
fn entry_uses_short_wire_names() {
    let entry = SessionEntry {
        session: SessionId::parse("s").expect("session"),
        arrived_at_ms: 1_700_000_000_000,
        sequence: 4,
        sample: None,
    };
    let value = serde_json::to_value(&entry).expect("json");
    assert_eq!(
        value,
        json!({ "session": "s", "t": 1_700_000_000_000_i64, "seq": 4, "sample": null })
    );
}
