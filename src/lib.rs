pub mod app;
pub mod config;
pub mod console_interface;
pub mod core;
pub mod input;
pub mod logging;
pub mod models;
pub mod progress;
pub mod projection;
pub mod render;
pub mod scores;
pub mod storage;
#[cfg(test)]
mod test;
