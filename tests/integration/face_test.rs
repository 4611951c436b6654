// Face rendering from a snapshot

use chrono::{Local, TimeZone};
use termface::core::display::{battery_bar, ActivityRings, DisplaySnapshot, Temperature};
use termface::ui::{face_lines, json_frame, FaceOptions};

fn evening() -> DisplaySnapshot {
    DisplaySnapshot {
        activity_rings: ActivityRings::new(420, 6, 8),
        step_count: 5_471,
        temperature: Temperature::Celsius(21),
        battery_fraction: 0.76,
        cursor_visible: true,
        activity_available: true,
        ..DisplaySnapshot::new(Local.with_ymd_and_hms(2025, 10, 19, 21, 5, 0).unwrap())
    }
}

#[test]
fn test_face_rows() {
    let rows: Vec<String> = face_lines(&evening(), &FaceOptions::default())
        .iter()
        .map(|line| line.plain_text())
        .collect();

    assert_eq!(
        rows,
        vec![
            "me@watch:~ $ now",
            "Time: 9:05 PM",
            "Date: Sun, Oct 19",
            "Rings: 420 - 6 - 8",
            "Temp: 21°C",
            "Steps: 5,471",
            "Bat: 76% [#####>-]",
            "me@watch:~ $ █",
        ]
    );
}

#[test]
fn test_hidden_cursor_and_missing_data() {
    let snapshot = DisplaySnapshot {
        temperature: Temperature::Unavailable,
        cursor_visible: false,
        activity_available: false,
        ..evening()
    };
    let rows: Vec<String> = face_lines(&snapshot, &FaceOptions::default())
        .iter()
        .map(|line| line.plain_text())
        .collect();

    assert_eq!(rows[3], "Rings: --");
    assert_eq!(rows[4], "Temp: --°C");
    assert_eq!(rows[5], "Steps: --");
    assert_eq!(rows[7], "me@watch:~ $");
}

#[test]
fn test_battery_bar_width_is_constant() {
    for width in 1..=12usize {
        for step in 0..=100u32 {
            let fraction = step as f64 / 100.0;
            let bar = battery_bar(fraction, width);
            assert_eq!(bar.chars().count(), width, "fraction {} width {}", fraction, width);
            let heads = bar.chars().filter(|c| *c == '>').count();
            assert!(heads <= 1);
            if heads == 0 {
                assert!(bar.chars().all(|c| c == '#'));
            }
        }
    }
    assert_eq!(battery_bar(f64::NAN, 4), ">---");
    assert_eq!(battery_bar(1.5, 4), "####");
}

#[test]
fn test_json_frame_fields() {
    let value: serde_json::Value = serde_json::from_str(&json_frame(&evening()).unwrap()).unwrap();
    assert_eq!(value["step_count"], 5_471);
    assert_eq!(value["activity_rings"]["move"], 420);
    assert_eq!(value["temperature"]["celsius"], 21);
    assert_eq!(value["cursor_visible"], true);
}
