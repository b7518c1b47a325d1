// ABOUTME: Library root for helmflow - Helm release orchestration.
// ABOUTME: The main binary is in main.rs; everything it drives is exposed here for testing.

pub mod config;
pub mod deploy;
pub mod error;
pub mod exec;
pub mod hooks;
pub mod output;
pub mod release;
pub mod types;
