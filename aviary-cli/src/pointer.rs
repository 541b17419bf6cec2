use std::str::FromStr;

use anyhow::{bail, Context};
use aviary_core::Vector2D;

/// Scripted stand-in for the cursor during a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPath {
    /// Cursor outside the page.
    Absent,
    Fixed(Vector2D),
    /// Circles `center` once every `period` frames.
    Orbit {
        center: Vector2D,
        radius: f32,
        period: u32,
    },
}

impl PointerPath {
    pub fn at(&self, frame: u64) -> Option<Vector2D> {
        match *self {
            PointerPath::Absent => None,
            PointerPath::Fixed(p) => Some(p),
            PointerPath::Orbit {
                center,
                radius,
                period,
            } => {
                let phase = (frame % period as u64) as f32 / period as f32;
                let angle = phase * std::f32::consts::TAU;
                Some(center + Vector2D::new(angle.cos(), angle.sin()) * radius)
            }
        }
    }
}

fn parse_numbers(text: &str, expected: usize) -> anyhow::Result<Vec<f32>> {
    let numbers = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .with_context(|| format!("'{}' is not a number", part.trim()))
        })
        .collect::<anyhow::Result<Vec<f32>>>()?;
    if numbers.len() != expected {
        bail!("expected {} comma-separated numbers, got {}", expected, numbers.len());
    }
    if let Some(bad) = numbers.iter().find(|n| !n.is_finite()) {
        bail!("pointer coordinates must be finite, got {}", bad);
    }
    Ok(numbers)
}

impl FromStr for PointerPath {
    type Err = anyhow::Error;

    /// Accepts `none`, `X,Y` or `orbit:CX,CY,RADIUS,PERIOD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(PointerPath::Absent);
        }
        if let Some(rest) = s.strip_prefix("orbit:") {
            let n = parse_numbers(rest, 4)?;
            if n[3] < 1.0 {
                bail!("orbit period must be at least one frame");
            }
            return Ok(PointerPath::Orbit {
                center: Vector2D::new(n[0], n[1]),
                radius: n[2],
                period: n[3] as u32,
            });
        }
        let n = parse_numbers(s, 2).context("pointer must be 'none', 'X,Y' or 'orbit:CX,CY,R,PERIOD'")?;
        Ok(PointerPath::Fixed(Vector2D::new(n[0], n[1])))
    }
}
