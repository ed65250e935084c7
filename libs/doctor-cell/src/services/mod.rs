pub mod roster;

pub use roster::DoctorService;
