use thiserror::Error;

/// Errors surfaced by the reader crate
#[derive(Error, Debug)]
pub enum IcalError {
    #[error(transparent)]
    CoreError(#[from] calstat_core::error::CoreError),
}

pub type IcalResult<T> = std::result::Result<T, IcalError>;
