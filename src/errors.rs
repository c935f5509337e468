//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// Invalid input.
#[derive(Debug)]
pub struct InvalidInput(pub String);

/// Invalid command line argument.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

/// Malformed export text.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Line number (1-based) of the offending line.
    pub line: usize,
    pub msg: String,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "parse error on line {}: {}", self.line, self.msg)
    }
}

impl error::Error for InvalidInput {}

impl error::Error for InvalidArgument {}

impl error::Error for ParseError {}

/// A helper for constructing [InvalidInput].
pub fn invalid_input(s: String) -> Box<dyn error::Error> {
    InvalidInput(s).into()
}

/// A helper for constructing [InvalidInput].
pub fn invalid_input_ref(s: &str) -> Box<dyn error::Error> {
    InvalidInput(s.to_owned()).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument(s: String) -> Box<dyn error::Error> {
    InvalidArgument(s).into()
}

/// A helper for constructing [ParseError].
pub fn parse_error(line: usize, msg: String) -> Box<dyn error::Error> {
    ParseError { line, msg }.into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_error_message() {
        let e = parse_error(12, "truncated entry header".to_owned());
        assert_eq!(
            format!("{e}"),
            "parse error on line 12: truncated entry header"
        );
        assert_eq!(
            e.downcast_ref::<ParseError>(),
            Some(&ParseError {
                line: 12,
                msg: "truncated entry header".to_owned()
            })
        );
    }

    #[test]
    fn invalid_input_message() {
        assert_eq!(
            format!("{}", invalid_input_ref("no entries found")),
            "invalid input: no entries found"
        );
    }
}
