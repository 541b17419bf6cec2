#![cfg(target_arch = "wasm32")]

use aviary_wasm::{bird_color, AviaryFlock, AviaryWanderer};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn seeded_flock_has_requested_size() {
    let flock = AviaryFlock::new(800.0, 600.0, Some(24), Some(7.0)).unwrap();
    assert_eq!(flock.len(), 24);
    assert_eq!(flock.positions().length(), 48);
    assert_eq!(flock.headings().length(), 24);
    assert_eq!(flock.ids(), (0..24).collect::<Vec<u32>>());
}

#[wasm_bindgen_test]
fn unseeded_flock_picks_default_size() {
    let flock = AviaryFlock::new(800.0, 600.0, None, None).unwrap();
    assert!((20..=30).contains(&flock.len()));
}

#[wasm_bindgen_test]
fn advance_counts_frames() {
    let mut flock = AviaryFlock::new(800.0, 600.0, Some(10), Some(1.0)).unwrap();
    flock.advance(400.0, 300.0, 800.0, 600.0).unwrap();
    flock.advance_without_pointer(1024.0, 768.0).unwrap();
    assert_eq!(flock.frame(), 2.0);
}

#[wasm_bindgen_test]
fn bad_viewport_is_reported() {
    let mut flock = AviaryFlock::new(800.0, 600.0, Some(10), Some(1.0)).unwrap();
    assert!(flock.advance(0.0, 0.0, f32::NAN, 600.0).is_err());
    assert_eq!(flock.frame(), 0.0);
    assert!(AviaryFlock::new(800.0, 600.0, Some(0), Some(1.0)).is_err());
}

#[wasm_bindgen_test]
fn settings_round_trip_through_json() {
    let mut flock = AviaryFlock::new(800.0, 600.0, Some(5), Some(3.0)).unwrap();
    flock.set_settings(r#"{ "responsiveness": 1.0 }"#).unwrap();
    assert!(flock.settings().unwrap().contains("\"responsiveness\": 1.0"));
    assert!(flock.set_settings(r#"{ "max_speed": -2.0 }"#).is_err());
}

#[wasm_bindgen_test]
fn snapshot_is_json() {
    let mut flock = AviaryFlock::new(800.0, 600.0, Some(3), Some(3.0)).unwrap();
    flock.advance(10.0, 10.0, 800.0, 600.0).unwrap();
    let json = flock.snapshot().unwrap();
    assert!(json.starts_with("{\"frame\":1"));
    assert!(json.contains("\"birds\""));
}

#[wasm_bindgen_test]
fn bird_color_is_css() {
    assert!(bird_color(0).starts_with("rgba(124, 58, 237"));
}

#[wasm_bindgen_test]
fn wanderer_moves() {
    let mut bird = AviaryWanderer::new(800.0, 600.0, Some(5.0)).unwrap();
    let (x, y) = (bird.x(), bird.y());
    bird.advance(-1000.0, -1000.0, 800.0, 600.0).unwrap();
    assert!(bird.x() != x || bird.y() != y);
}
