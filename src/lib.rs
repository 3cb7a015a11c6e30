pub mod app;
pub mod body;
pub mod config;
pub mod renderer;
pub mod scenario;
pub mod scheduler;
pub mod simulation;
