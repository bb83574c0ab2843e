pub mod bot;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod openai;
pub mod types;

#[cfg(test)]
mod testing;

pub use bot::run;
