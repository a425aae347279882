//! The parameters of one render, gathered into a single immutable
//! value.  Nothing about the image is baked into the engine itself;
//! one renderer serves every size, cap, and position.

use errors::RenderError;

/// Everything the engine needs to know to produce one image.  The
/// value is `Copy` and never mutated during a render.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Iteration cap; orbits that survive this many steps are treated
    /// as members of the set.
    pub max_iterations: u32,
    /// Magnitude beyond which an orbit counts as escaped.
    pub escape_radius: f64,
    /// Multiplier applied to mapped coordinates, after the offset.
    pub scale: f64,
    /// Translation applied to mapped coordinates, before the scale.
    pub offset: (f64, f64),
}

impl RenderConfig {
    /// Checks the invariants every other module relies on: positive
    /// dimensions, a positive iteration cap, a positive escape
    /// radius.  Called once, before any tile exists.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 {
            return Err(RenderError::Configuration(
                "width must be positive".to_string(),
            ));
        }
        if self.height == 0 {
            return Err(RenderError::Configuration(
                "height must be positive".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(RenderError::Configuration(
                "iteration cap must be positive".to_string(),
            ));
        }
        if self.escape_radius <= 0.0 {
            return Err(RenderError::Configuration(
                "escape radius must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: 1024,
            height: 1024,
            max_iterations: 100,
            escape_radius: 2.0,
            scale: 2.0,
            offset: (0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_width_is_rejected() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        match config.validate() {
            Err(RenderError::Configuration(msg)) => assert!(msg.contains("width")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        let config = RenderConfig {
            max_iterations: 0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nonpositive_radius_is_rejected() {
        let config = RenderConfig {
            escape_radius: 0.0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RenderConfig {
            escape_radius: -2.0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
