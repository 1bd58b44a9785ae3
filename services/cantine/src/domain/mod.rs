pub mod dump;
pub mod repository;
pub mod types;
