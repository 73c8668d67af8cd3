//! Services for fetching and normalizing weight data

pub mod form;
pub mod normalizer;
pub mod session;
pub mod settings;
pub mod weightbot;

pub use normalizer::normalize;
pub use session::{ExportSource, SessionClient};
pub use weightbot::Weightbot;
