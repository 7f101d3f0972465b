pub mod circuit;
pub mod components;
pub mod config;
pub mod connections;
pub mod geometry;
pub mod types;

#[cfg(test)]
mod tests;
