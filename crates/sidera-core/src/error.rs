/// Which side of the request an error blames: the canvas configuration or the graph data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    Validation,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid canvas size {width}x{height}: both dimensions must be positive")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("invalid padding ratio {ratio}: expected a finite value in [0, 0.5) leaving a drawable area")]
    InvalidPadding { ratio: f64 },

    #[error("node `{node_id}` has a non-finite {axis} coordinate")]
    NonFiniteCoordinate { node_id: String, axis: char },

    #[error("the {axis} extent of the constellation overflows a finite range")]
    CoordinateOverflow { axis: char },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::InvalidCanvas { .. } | Error::InvalidPadding { .. } | Error::InvalidConfig { .. } => {
                ErrorClass::Configuration
            }
            Error::NonFiniteCoordinate { .. } | Error::CoordinateOverflow { .. } => {
                ErrorClass::Validation
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
