pub mod dtos;
pub mod handlers;

pub use handlers::analyze;
