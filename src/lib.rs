#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts
)]

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::comparator::{RequestInput, RequestsComparator};
pub use application::parser::RequestParser;
pub use domain::errors::CompareError;
pub use domain::field::Field;
pub use domain::request::{Headers, Request};
pub use infrastructure::parser::{HttparseRequestParser, ParseOptions};

pub type AnyResult<T> = eyre::Result<T>;
