pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;
