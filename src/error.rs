/// Reasons a calculation is rejected. All of them are recoverable by asking
/// the user for different input.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no known route between {origin} and {destination}")]
    UnknownRoute { origin: String, destination: String },
    #[error("origin and destination are the same city ({0})")]
    DegenerateRoute(String),
    #[error("unknown transport mode \"{0}\"")]
    UnknownTransportMode(String),
}

/// Violations of the reference tables' invariants, found while loading them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("city \"{0}\" is listed more than once")]
    DuplicateCity(String),
    #[error("route {from} - {to} references an unknown city")]
    UnknownCity { from: String, to: String },
    #[error("route {0} - {0} connects a city to itself")]
    SelfRoute(String),
    #[error("route {from} - {to} is listed more than once")]
    DuplicateRoute { from: String, to: String },
    #[error("route {from} - {to} has a non-positive distance ({km} km)")]
    InvalidDistance { from: String, to: String, km: f64 },
    #[error("transport mode \"{0}\" is listed more than once")]
    DuplicateMode(String),
    #[error("transport mode \"{mode}\" has a non-positive emission factor ({factor} kg/km)")]
    InvalidFactor { mode: String, factor: f64 },
    #[error("offset ratio must be positive, got {0} trees per ton")]
    InvalidOffsetRatio(f64),
}
