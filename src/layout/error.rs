use thiserror::Error;

/// Errors surfaced by the layout engine. Configuration problems are
/// reported before any layout work starts; `PlacementOverflow` is the only
/// error a structurally valid run can produce.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("container size must be positive, got {width}x{height}")]
    InvalidContainer { width: f32, height: f32 },

    #[error("max_font_size ({max}) must not be smaller than min_font_size ({min})")]
    FontSizeRange { min: f32, max: f32 },

    /// The spiral search exhausted its safety radius. Retrying will not
    /// help: the cause is too many or too large words for the container.
    #[error("no free position for {word:?} within the search limit")]
    PlacementOverflow { word: String },

    #[error("layout worker terminated unexpectedly")]
    WorkerClosed,
}
