mod line;
mod parser;
mod result;
mod string;

pub use parser::parse_dump;
