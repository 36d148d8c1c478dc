pub mod config;
pub mod manifest;
pub mod normalize;
pub mod paths;
pub mod transcript;

pub mod error;
