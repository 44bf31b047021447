pub mod common;
pub mod forecast;
pub mod health;
pub mod menu_item;
pub mod training;
