//! Rate-limited, cached address resolution against a Nominatim-compatible
//! search endpoint.

pub mod error;
pub mod resolver;

pub use error::GeocodeError;
pub use resolver::Resolver;
