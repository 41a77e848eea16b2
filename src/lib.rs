pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod probe;
pub mod report;
pub mod url;
