pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod query;
pub mod runner;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod tests;
