pub mod error;
pub mod types;
pub mod movegen;
pub mod piece;
pub mod square;
pub mod board;
pub mod render;
pub mod config;
pub mod game;
pub mod command;
