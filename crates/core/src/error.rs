use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown ruleset: {0}")]
    UnknownRuleset(String),

    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;
