use thiserror::Error;
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("zoom level {level} collapses the visible window (max level is {max_level})")]
    ZoomOutOfRange { level: u32, max_level: u32 },
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to render surface: {0}")]
    Surface(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ScopeError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ScopeError::Surface(format!("{value:?}"))
    }
}
