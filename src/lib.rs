pub mod config;
pub mod courses;
pub mod error;
pub mod fetch;
pub mod grades;
pub mod logging;
pub mod output;
pub mod parser;
pub mod server;
