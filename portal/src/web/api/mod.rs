pub mod config;
pub mod default;
pub mod detect;
pub mod log;
pub mod message;
