pub mod repository;
pub mod settings;
pub mod ticker;
