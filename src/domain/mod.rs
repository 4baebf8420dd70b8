//! Domain Layer
//!
//! Location types, the locale rule, error taxonomy, ports and the
//! stateless domain services. No transport or database dependencies.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod request;
pub mod services;
pub mod value_objects;
