//! Type definitions for weightbot

mod credentials;
mod error;
mod record;

pub use credentials::*;
pub use error::*;
pub use record::*;
