pub mod errors;
pub mod field;
pub mod request;
