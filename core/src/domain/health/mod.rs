pub mod ports;
pub mod services;

pub use ports::HealthCheckRepository;
