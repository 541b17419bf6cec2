#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking simulation behind the decorative bird overlay.
//!
//! A host owns a [`Flock`] and calls [`Flock::advance`] once per animation
//! frame with the current pointer position and viewport size. Nothing here
//! performs I/O or keeps time; randomness is confined to spawning.

extern crate alloc;

pub mod behavior;
mod boid;
mod config;
mod error;
mod flock;
pub mod integrator;
mod vector;
mod wanderer;

pub use boid::{Boid, Viewport};
pub use config::{FlockConfig, MAX_BIRD_COUNT, MIN_BIRD_COUNT};
pub use error::FlockError;
pub use flock::{random_count, Flock};
pub use vector::{Vector2D, EPSILON};
pub use wanderer::{Wanderer, WandererConfig};
