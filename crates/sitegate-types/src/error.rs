//! Workspace-wide error conventions.
//!
//! Every sitegate error type implements [`ErrorCode`] so that screens and
//! logs can report stable machine-readable codes and decide whether a retry
//! is worth offering.

/// Stable machine-readable error identification.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"SESSION_STORAGE_IO"`
/// - **Domain-prefixed**: `"CAP_"`, `"SESSION_"`, `"API_"`
/// - **Stable**: a code is an API contract and must not change once defined
///
/// # Recoverability
///
/// An error is recoverable when retrying may succeed or the user can take
/// corrective action (transient network failure, timeout). Denied
/// permissions and invalid input are not recoverable: the attempt will fail
/// the same way until something else changes.
///
/// # Example
///
/// ```
/// use sitegate_types::ErrorCode;
///
/// #[derive(Debug)]
/// enum FetchError {
///     Timeout,
///     Denied,
/// }
///
/// impl ErrorCode for FetchError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::Timeout => "FETCH_TIMEOUT",
///             Self::Denied => "FETCH_DENIED",
///         }
///     }
///
///     fn is_recoverable(&self) -> bool {
///         matches!(self, Self::Timeout)
///     }
/// }
///
/// assert_eq!(FetchError::Timeout.code(), "FETCH_TIMEOUT");
/// assert!(FetchError::Timeout.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Returns the machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying (or user action) may resolve the error.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows sitegate conventions.
///
/// Checks: non-empty, carries the expected domain prefix, and is
/// UPPER_SNAKE_CASE.
///
/// # Panics
///
/// Panics with a descriptive message when a check fails. Intended for use
/// in tests covering every variant of an error enum.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Asserts conventions over a slice of error values at once.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum SampleError {
        Transient,
        Permanent,
    }

    impl ErrorCode for SampleError {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "SAMPLE_TRANSIENT",
                Self::Permanent => "SAMPLE_PERMANENT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn trait_reports_code_and_recoverability() {
        assert_eq!(SampleError::Transient.code(), "SAMPLE_TRANSIENT");
        assert!(SampleError::Transient.is_recoverable());
        assert!(!SampleError::Permanent.is_recoverable());
    }

    #[test]
    fn assert_helper_accepts_valid_codes() {
        assert_error_codes(&[SampleError::Transient, SampleError::Permanent], "SAMPLE_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn assert_helper_rejects_wrong_prefix() {
        assert_error_code(&SampleError::Transient, "OTHER_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("API_TIMEOUT"));
        assert!(is_upper_snake_case("A_1"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("api_timeout"));
        assert!(!is_upper_snake_case("_API"));
        assert!(!is_upper_snake_case("API__TIMEOUT"));
    }
}
