use thiserror::Error;

/// Errors raised when a flock is created or advanced with unusable inputs.
///
/// Every check runs before any bird is touched, so a failed call leaves the
/// flock exactly as it was and the caller may simply skip the frame.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FlockError {
    #[error("a flock needs at least one bird")]
    EmptyFlock,

    #[error("viewport {width}x{height} must be finite and positive")]
    InvalidViewport { width: f32, height: f32 },

    #[error("pointer ({x}, {y}) must be finite")]
    InvalidPointer { x: f32, y: f32 },

    #[error("bird {id} has a non-finite position or velocity")]
    InvalidBird { id: u32 },

    #[error("bird id {0} appears more than once")]
    DuplicateId(u32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
