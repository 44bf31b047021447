pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::NewPrediction;
pub use value_objects::{Features, Season};
