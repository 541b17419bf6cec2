use anyhow::{Context, Result};
use aviary_core::{Boid, Flock, Viewport, Wanderer};
use serde::Serialize;

use crate::pointer::PointerPath;

/// Aggregate picture of the flock after a run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunSummary {
    pub birds: usize,
    pub frames: u64,
    pub mean_speed: f32,
    pub max_speed: f32,
    /// Smallest distance between any two birds in the final frame.
    pub min_spacing: Option<f32>,
    pub centroid: [f32; 2],
}

impl RunSummary {
    pub fn from_boids(boids: &[Boid], frames: u64) -> Self {
        let birds = boids.len();
        let count = birds.max(1) as f32;

        let mean_speed = boids.iter().map(Boid::speed).sum::<f32>() / count;
        let max_speed = boids.iter().map(Boid::speed).fold(0.0, f32::max);
        let (sx, sy) = boids
            .iter()
            .fold((0.0, 0.0), |(x, y), b| (x + b.position.x, y + b.position.y));

        let min_spacing = boids
            .iter()
            .enumerate()
            .flat_map(|(i, a)| boids[i + 1..].iter().map(move |b| a.position.distance(&b.position)))
            .reduce(f32::min);

        Self {
            birds,
            frames,
            mean_speed,
            max_speed,
            min_spacing,
            centroid: [sx / count, sy / count],
        }
    }
}

/// Drives a flock the way a page's animation loop would.
pub struct Runner {
    flock: Flock,
    pointer: PointerPath,
    viewport: Viewport,
    frame: u64,
}

impl Runner {
    pub fn new(flock: Flock, pointer: PointerPath, viewport: Viewport) -> Self {
        Self {
            flock,
            pointer,
            viewport,
            frame: 0,
        }
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Changes the viewport used from the next frame on, like a window resize.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    pub fn step(&mut self) -> Result<&[Boid]> {
        let pointer = self.pointer.at(self.frame);
        let boids = self
            .flock
            .advance(pointer, self.viewport)
            .with_context(|| format!("frame {} failed", self.frame))?;
        self.frame += 1;
        Ok(boids)
    }

    /// Runs `frames` frames, handing each finished frame to `on_frame`.
    pub fn run<F>(&mut self, frames: u64, mut on_frame: F) -> Result<RunSummary>
    where
        F: FnMut(u64, Viewport, &[Boid]) -> Result<()>,
    {
        for _ in 0..frames {
            let viewport = self.viewport;
            let frame = self.frame + 1;
            let boids = self.step()?;
            on_frame(frame, viewport, boids)?;
        }
        Ok(RunSummary::from_boids(self.flock.boids(), self.frame))
    }
}

/// One frame of the single-bird overlay.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WandererFrame {
    pub frame: u64,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

pub fn run_wanderer<F>(
    bird: &mut Wanderer,
    pointer: PointerPath,
    viewport: Viewport,
    frames: u64,
    mut on_frame: F,
) -> Result<()>
where
    F: FnMut(&WandererFrame) -> Result<()>,
{
    for frame in 0..frames {
        let position = bird
            .advance(pointer.at(frame), viewport)
            .with_context(|| format!("wanderer frame {} failed", frame))?;
        on_frame(&WandererFrame {
            frame: frame + 1,
            x: position.x,
            y: position.y,
            heading: bird.heading_degrees(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviary_core::{FlockConfig, Vector2D};

    #[test]
    fn test_summary_of_pair() {
        let boids = [
            Boid::new(0, Vector2D::new(0.0, 0.0), Vector2D::new(3.0, 4.0)),
            Boid::new(1, Vector2D::new(6.0, 8.0), Vector2D::new(0.0, 1.0)),
        ];
        let summary = RunSummary::from_boids(&boids, 9);
        assert_eq!(summary.birds, 2);
        assert_eq!(summary.frames, 9);
        assert_eq!(summary.mean_speed, 3.0);
        assert_eq!(summary.max_speed, 5.0);
        assert_eq!(summary.min_spacing, Some(10.0));
        assert_eq!(summary.centroid, [3.0, 4.0]);
    }

    #[test]
    fn test_summary_single_bird_has_no_spacing() {
        let boids = [Boid::new(0, Vector2D::new(1.0, 1.0), Vector2D::zero())];
        assert_eq!(RunSummary::from_boids(&boids, 0).min_spacing, None);
    }

    #[test]
    fn test_run_reports_every_frame() {
        let flock = Flock::seeded(12, 640.0, 480.0, FlockConfig::default(), 4).unwrap();
        let mut runner = Runner::new(flock, PointerPath::Absent, Viewport::new(640.0, 480.0));

        let mut seen = Vec::new();
        let summary = runner
            .run(5, |frame, _, boids| {
                seen.push((frame, boids.len()));
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec![(1, 12), (2, 12), (3, 12), (4, 12), (5, 12)]);
        assert_eq!(summary.frames, 5);
        assert_eq!(runner.frame(), 5);
    }

    #[test]
    fn test_callback_error_stops_run() {
        let flock = Flock::seeded(3, 640.0, 480.0, FlockConfig::default(), 4).unwrap();
        let mut runner = Runner::new(flock, PointerPath::Absent, Viewport::new(640.0, 480.0));
        let result = runner.run(10, |frame, _, _| {
            if frame == 3 {
                anyhow::bail!("sink closed");
            }
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(runner.frame(), 3);
    }
}
