#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use aviary_core::{Boid, FlockConfig, Viewport};
use serde::{Deserialize, Serialize};

/// Flock tunables as they appear in settings files and host messages.
///
/// Missing fields fall back to the simulation defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub mouse_avoid_radius: f32,
    pub mouse_avoid_force: f32,
    pub panic: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub responsiveness: f32,
    pub upward_bias: f32,
    pub max_safe_speed: f32,
    pub agent_size: f32,
}

impl Default for FlockSettings {
    fn default() -> Self {
        FlockConfig::default().into()
    }
}

impl From<FlockConfig> for FlockSettings {
    fn from(config: FlockConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            max_force: config.max_force,
            separation_radius: config.separation_radius,
            alignment_radius: config.alignment_radius,
            cohesion_radius: config.cohesion_radius,
            mouse_avoid_radius: config.mouse_avoid_radius,
            mouse_avoid_force: config.mouse_avoid_force,
            panic: config.panic,
            separation_weight: config.separation_weight,
            alignment_weight: config.alignment_weight,
            cohesion_weight: config.cohesion_weight,
            responsiveness: config.responsiveness,
            upward_bias: config.upward_bias,
            max_safe_speed: config.max_safe_speed,
            agent_size: config.agent_size,
        }
    }
}

impl From<FlockSettings> for FlockConfig {
    fn from(settings: FlockSettings) -> Self {
        Self {
            max_speed: settings.max_speed,
            max_force: settings.max_force,
            separation_radius: settings.separation_radius,
            alignment_radius: settings.alignment_radius,
            cohesion_radius: settings.cohesion_radius,
            mouse_avoid_radius: settings.mouse_avoid_radius,
            mouse_avoid_force: settings.mouse_avoid_force,
            panic: settings.panic,
            separation_weight: settings.separation_weight,
            alignment_weight: settings.alignment_weight,
            cohesion_weight: settings.cohesion_weight,
            responsiveness: settings.responsiveness,
            upward_bias: settings.upward_bias,
            max_safe_speed: settings.max_safe_speed,
            agent_size: settings.agent_size,
        }
    }
}

#[cfg(feature = "std")]
impl FlockSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// violet-600 through violet-900
const VIOLET_SHADES: [[u8; 3]; 4] = [
    [124, 58, 237],
    [109, 40, 217],
    [91, 33, 182],
    [76, 29, 149],
];

/// Fill colour of one bird glyph, fixed for the bird's lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BirdStyle {
    pub rgb: [u8; 3],
    pub opacity: f32,
}

impl BirdStyle {
    pub fn for_id(id: u32) -> Self {
        let id = id as u64;
        let rgb = VIOLET_SHADES[((id * 3) % 4) as usize];
        let opacity = (60 + (id * 7) % 31) as f32 / 100.0;
        Self { rgb, opacity }
    }

    /// CSS `rgba(...)` string.
    pub fn css(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("rgba({}, {}, {}, {})", r, g, b, self.opacity)
    }
}

/// Render-ready state of one bird.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BirdSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub heading: f32,
    pub style: BirdStyle,
}

impl From<&Boid> for BirdSnapshot {
    fn from(boid: &Boid) -> Self {
        Self {
            id: boid.id,
            x: boid.position.x,
            y: boid.position.y,
            vx: boid.velocity.x,
            vy: boid.velocity.y,
            heading: boid.heading_degrees(),
            style: BirdStyle::for_id(boid.id),
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub width: f32,
    pub height: f32,
    pub birds: Vec<BirdSnapshot>,
}

impl FrameSnapshot {
    pub fn capture(frame: u64, viewport: Viewport, boids: &[Boid]) -> Self {
        Self {
            frame,
            width: viewport.width,
            height: viewport.height,
            birds: boids.iter().map(BirdSnapshot::from).collect(),
        }
    }

    #[cfg(feature = "std")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviary_core::Vector2D;

    #[test]
    fn test_settings_default_matches_config() {
        let config: FlockConfig = FlockSettings::default().into();
        assert_eq!(config, FlockConfig::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings =
            FlockSettings::from_json(r#"{ "max_speed": 4.5, "responsiveness": 1.0 }"#).unwrap();
        assert_eq!(settings.max_speed, 4.5);
        assert_eq!(settings.responsiveness, 1.0);
        assert_eq!(settings.separation_radius, 25.0);
        assert_eq!(settings.max_safe_speed, 3.2);
    }

    #[test]
    fn test_malformed_settings_rejected() {
        assert!(FlockSettings::from_json(r#"{ "max_speed": "fast" }"#).is_err());
    }

    #[test]
    fn test_style_for_id() {
        let first = BirdStyle::for_id(0);
        assert_eq!(first.rgb, [124, 58, 237]);
        assert_eq!(first.opacity, 0.6);

        let second = BirdStyle::for_id(1);
        assert_eq!(second.rgb, [76, 29, 149]);
        assert_eq!(second.opacity, 0.67);

        let fourth = BirdStyle::for_id(3);
        assert_eq!(fourth.rgb, [109, 40, 217]);
        assert_eq!(fourth.opacity, 0.81);
    }

    #[test]
    fn test_style_opacity_range() {
        for id in 0..500 {
            let style = BirdStyle::for_id(id);
            assert!(style.opacity >= 0.6 && style.opacity <= 0.9);
        }
    }

    #[test]
    fn test_style_css() {
        assert_eq!(BirdStyle::for_id(0).css(), "rgba(124, 58, 237, 0.6)");
    }

    #[test]
    fn test_frame_snapshot_capture() {
        let boids = [
            Boid::new(0, Vector2D::new(1.0, 2.0), Vector2D::new(0.0, 1.0)),
            Boid::new(4, Vector2D::new(3.0, 4.0), Vector2D::new(-1.0, 0.0)),
        ];
        let snapshot = FrameSnapshot::capture(12, Viewport::new(640.0, 480.0), &boids);

        assert_eq!(snapshot.frame, 12);
        assert_eq!(snapshot.birds.len(), 2);
        assert_eq!(snapshot.birds[1].id, 4);
        assert!((snapshot.birds[0].heading - 90.0).abs() < 1e-4);
        assert_eq!(snapshot.birds[1].style, BirdStyle::for_id(4));

        let json = snapshot.to_json().unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.birds[0].x, 1.0);
    }
}
