use thiserror::Error;

/// Errors reported by a render pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("render worker for rows {start_row}..{end_row} panicked: {message}")]
    WorkerPanicked {
        start_row: u32,
        end_row: u32,
        message: String,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;
