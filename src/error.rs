use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("energy series must contain at least one value")]
    EmptySeries,

    #[error("energy at index {index} is not a finite number: {value}")]
    NonFiniteEnergy { index: usize, value: f64 },

    #[error("energy at index {index} cannot be converted to f64: {reason}")]
    EnergyConversion { index: usize, reason: String },

    #[error("zero reference index {index} out of range for series of length {len}")]
    ZeroIndexOutOfRange { index: usize, len: usize },

    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("invalid label format `{format}`: {reason}")]
    InvalidLabelFormat { format: String, reason: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render backend failure: {0}")]
    Backend(String),
}

impl ChartError {
    pub(crate) fn option(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}
