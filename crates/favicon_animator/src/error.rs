//! Error types for animator setup and the collaborators it drives.

use thiserror::Error;

/// Reasons [`FaviconAnimator::initialize`](crate::FaviconAnimator::initialize)
/// refuses to arm the animation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SetupError {
    #[error("no drawable surface found")]
    MissingSurface,

    #[error("surface has no 2D drawing context")]
    MissingContext,

    #[error("no trigger element found")]
    MissingTrigger,

    #[error("no favicon link found")]
    MissingFavicon,

    #[error("invalid animator configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to apply stroke style: {0}")]
    Surface(#[from] SurfaceError),
}

/// Failures reported by a [`DrawingSurface`](crate::DrawingSurface).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("gradient rejected: {0}")]
    Gradient(String),

    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// Failures reported by a [`Ticker`](crate::Ticker).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TickerError {
    #[error("timer rejected by host: {0}")]
    Rejected(String),
}

/// Colour strings that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    #[error("expected 6 or 8 hex digits, got {0:?}")]
    Length(String),

    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

pub type Result<T, E = SetupError> = std::result::Result<T, E>;
