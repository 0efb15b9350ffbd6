pub mod db;
pub mod models;
pub mod sample;

pub use rusqlite;
