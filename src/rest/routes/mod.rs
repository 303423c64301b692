pub mod apps;
pub mod catalog;
pub mod health;
pub mod reviews;
