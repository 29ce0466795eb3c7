pub mod adapters;
pub mod parser;
