//! Result type alias for marcexport
//!
//! This module provides a convenient Result type alias that uses
//! MarcExportError as the error type.

use super::errors::MarcExportError;

/// Result type alias for marcexport operations
///
/// This is a convenience type alias that uses `MarcExportError` as the error
/// type. Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use marcexport::domain::result::Result;
/// use marcexport::domain::errors::MarcExportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MarcExportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MarcExportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::MarcExportError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
        if let Ok(value) = result {
            assert_eq!(value, 42);
        }
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(MarcExportError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
