pub mod comparator;
pub mod parser;
