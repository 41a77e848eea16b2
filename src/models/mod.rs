pub mod connection;
pub mod report;

pub use connection::*;
pub use report::*;
