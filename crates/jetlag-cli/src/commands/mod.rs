pub mod config;
pub mod interactive;
pub mod plan;
pub mod serve;
pub mod zones;
