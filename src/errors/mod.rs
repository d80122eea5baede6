pub mod types;
pub mod classification;

pub use types::BootstrapError;
pub use classification::ErrorClassification;
