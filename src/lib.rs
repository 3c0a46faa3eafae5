#![forbid(unsafe_code)]

mod calculator;
pub mod csv;
mod emission_factors;
mod error;
mod routes;

pub use calculator::*;
pub use emission_factors::*;
pub use error::*;
pub use routes::*;
