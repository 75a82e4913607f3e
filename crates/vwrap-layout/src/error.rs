#![forbid(unsafe_code)]

//! Error types.
//!
//! Geometry and range computations clamp instead of failing, so the only
//! errors are configuration misuse and a host that cannot produce a container.

use std::fmt;

/// The host could not produce a container for an item index.
///
/// This means the item collection and the generation facility are out of
/// sync. The measure pass that hit it is abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateError {
    pub index: usize,
    pub reason: String,
}

impl GenerateError {
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to generate container for item {}: {}",
            self.index, self.reason
        )
    }
}

impl std::error::Error for GenerateError {}

/// Structurally invalid configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A fixed item size must be finite and positive on both axes.
    InvalidItemSize { width: f64, height: f64 },
    /// Cache lengths must be finite and non-negative.
    InvalidCacheLength { before: f64, after: f64 },
    /// Pixel scroll deltas must be finite and non-negative.
    InvalidScrollDelta { name: &'static str, value: f64 },
    /// Item scroll deltas must be at least one item.
    ZeroItemDelta { name: &'static str },
    /// The stretch cap must be positive (it may be infinite).
    InvalidStretchLimit { value: f64 },
    /// A grouping context asked for a page-based cache. Nested groups only
    /// support pixel or item cache units.
    PageCacheInGroup,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidItemSize { width, height } => write!(
                f,
                "item size must be finite and positive, got {width}x{height}"
            ),
            Self::InvalidCacheLength { before, after } => write!(
                f,
                "cache length must be finite and non-negative, got before={before} after={after}"
            ),
            Self::InvalidScrollDelta { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::ZeroItemDelta { name } => write!(f, "{name} must be at least 1 item"),
            Self::InvalidStretchLimit { value } => {
                write!(f, "max stretch size must be positive, got {value}")
            }
            Self::PageCacheInGroup => write!(
                f,
                "page cache unit is not supported inside a grouping context (use pixel or item)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Error returned by a measure pass.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    Config(ConfigError),
    Generation(GenerateError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid layout configuration: {err}"),
            Self::Generation(err) => write!(f, "container generation failed: {err}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Generation(err) => Some(err),
        }
    }
}

impl From<ConfigError> for LayoutError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<GenerateError> for LayoutError {
    fn from(err: GenerateError) -> Self {
        Self::Generation(err)
    }
}
