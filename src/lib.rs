pub mod cliopt;
pub mod dump;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
