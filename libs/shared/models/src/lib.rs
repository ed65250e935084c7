pub mod appointment;
pub mod doctor;
pub mod error;
pub mod patient;
pub mod prediction;
pub mod settings;

// Re-export the domain entities for external use
pub use appointment::*;
pub use doctor::*;
pub use patient::*;
pub use prediction::*;
pub use settings::*;
