pub mod gateway;
pub mod memory;

pub use gateway::{AppointmentFilter, ClinicStore, StoreError};
pub use memory::MemoryStore;
