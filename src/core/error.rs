use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("invalid particle override for {context}: {source}")]
    InvalidOverride {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Rejects canvases that cannot hold a particle.
pub fn check_dimensions(width: f32, height: f32) -> Result<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidDimensions { width, height })
    }
}
