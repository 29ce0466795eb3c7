use crate::domain::request::Request;
use crate::AnyResult;

/// Turns raw request text into a [Request].
///
/// Any error counts as "not a valid HTTP request".
pub trait RequestParser {
    fn parse(&self, text: &str) -> AnyResult<Request>;
}

impl<F> RequestParser for F
where
    F: Fn(&str) -> AnyResult<Request>,
{
    fn parse(&self, text: &str) -> AnyResult<Request> {
        self(text)
    }
}
