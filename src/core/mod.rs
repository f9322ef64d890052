pub mod chunk;
pub mod config;
pub mod symbol;
