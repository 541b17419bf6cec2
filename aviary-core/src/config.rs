use crate::error::FlockError;

/// Smallest flock spawned when the host has no preferred size.
pub const MIN_BIRD_COUNT: usize = 20;
/// Largest flock spawned when the host has no preferred size.
pub const MAX_BIRD_COUNT: usize = 30;

/// Tunables for the flocking simulation.
///
/// Speeds are in pixels per frame and distances in viewport pixels. Forces are
/// not scaled by elapsed time, so the flock moves faster on displays that
/// refresh more often.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    /// Desired speed every steering rule aims for.
    pub max_speed: f32,
    /// Clamp applied to separation, alignment and cohesion steering.
    pub max_force: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    /// Distance from the pointer at which birds start fleeing.
    pub mouse_avoid_radius: f32,
    /// Clamp applied to pointer-avoidance steering.
    pub mouse_avoid_force: f32,
    /// Gain on pointer-avoidance before it is clamped.
    pub panic: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Extra gain on the three flocking forces; above 1 makes turns snappier.
    pub responsiveness: f32,
    /// Constant climb applied every frame (screen y grows downward).
    pub upward_bias: f32,
    /// Ceiling on the combined velocity after all forces are summed.
    pub max_safe_speed: f32,
    /// How far past an edge a bird travels before reappearing on the other side.
    pub agent_size: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            max_force: 0.05,
            separation_radius: 25.0,
            alignment_radius: 65.0,
            cohesion_radius: 100.0,
            mouse_avoid_radius: 200.0,
            mouse_avoid_force: 0.2,
            panic: 4.0,
            separation_weight: 2.5,
            alignment_weight: 2.0,
            cohesion_weight: 1.0,
            responsiveness: 1.3,
            upward_bias: 0.02,
            max_safe_speed: 3.2,
            agent_size: 50.0,
        }
    }
}

pub(crate) fn positive(value: f32, message: &'static str) -> Result<(), FlockError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FlockError::InvalidConfig(message))
    }
}

pub(crate) fn non_negative(value: f32, message: &'static str) -> Result<(), FlockError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FlockError::InvalidConfig(message))
    }
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), FlockError> {
        positive(self.max_speed, "max_speed must be positive")?;
        positive(self.max_force, "max_force must be positive")?;
        positive(self.separation_radius, "separation_radius must be positive")?;
        positive(self.alignment_radius, "alignment_radius must be positive")?;
        positive(self.cohesion_radius, "cohesion_radius must be positive")?;
        positive(self.mouse_avoid_radius, "mouse_avoid_radius must be positive")?;
        positive(self.mouse_avoid_force, "mouse_avoid_force must be positive")?;
        non_negative(self.panic, "panic must not be negative")?;
        non_negative(self.separation_weight, "separation_weight must not be negative")?;
        non_negative(self.alignment_weight, "alignment_weight must not be negative")?;
        non_negative(self.cohesion_weight, "cohesion_weight must not be negative")?;
        positive(self.responsiveness, "responsiveness must be positive")?;
        if !self.upward_bias.is_finite() {
            return Err(FlockError::InvalidConfig("upward_bias must be finite"));
        }
        positive(self.max_safe_speed, "max_safe_speed must be positive")?;
        non_negative(self.agent_size, "agent_size must not be negative")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(FlockConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_safety_ceiling_above_desired_speed() {
        let config = FlockConfig::default();
        assert!(config.max_safe_speed > config.max_speed);
    }

    #[test]
    fn test_rejects_non_finite_radius() {
        let config = FlockConfig {
            cohesion_radius: f32::NAN,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(FlockError::InvalidConfig("cohesion_radius must be positive"))
        );
    }

    #[test]
    fn test_rejects_zero_safe_speed() {
        let config = FlockConfig {
            max_safe_speed: 0.0,
            ..FlockConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_allows_downward_bias() {
        let config = FlockConfig {
            upward_bias: -0.5,
            ..FlockConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
