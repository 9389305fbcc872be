//! Centralized validation of run parameters.
//!
//! Used both by the library (`DedupConfig::validate`) and by clap value
//! parsers so that bad values are rejected before any file is touched.

/// Parameter validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{name} must be in (0, 100], got {value}")]
    PercentOutOfRange { name: &'static str, value: f64 },
    #[error("Line width must be at least 1")]
    ZeroLineWidth,
    #[error("Thread count must be at least 1")]
    ZeroThreads,
    #[error("Invalid number: {0}")]
    NotANumber(String),
}

/// Validate a percentage threshold (identity or coverage).
///
/// # Examples
///
/// ```
/// use contig_dedup::utils::validation::validate_percent;
///
/// assert!(validate_percent("identity", 95.0).is_ok());
/// assert!(validate_percent("identity", 100.0).is_ok());
/// assert!(validate_percent("identity", 0.0).is_err());
/// assert!(validate_percent("identity", 100.5).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::PercentOutOfRange` unless `0 < value <= 100`.
pub fn validate_percent(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value > 0.0 && value <= 100.0 {
        Ok(value)
    } else {
        Err(ValidationError::PercentOutOfRange { name, value })
    }
}

/// Validate the FASTA output line width.
///
/// # Errors
///
/// Returns `ValidationError::ZeroLineWidth` for 0.
pub fn validate_line_width(width: usize) -> Result<usize, ValidationError> {
    if width == 0 {
        Err(ValidationError::ZeroLineWidth)
    } else {
        Ok(width)
    }
}

/// Validate the aligner thread count.
///
/// # Errors
///
/// Returns `ValidationError::ZeroThreads` for 0.
pub fn validate_threads(threads: usize) -> Result<usize, ValidationError> {
    if threads == 0 {
        Err(ValidationError::ZeroThreads)
    } else {
        Ok(threads)
    }
}

/// clap value parser for percentage flags
///
/// # Errors
///
/// Returns a message if the value is not a number or out of range.
pub fn parse_percent(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber(s.to_string()).to_string())?;
    validate_percent("percentage", value).map_err(|e| e.to_string())
}

/// clap value parser for positive integer flags (threads, line width)
///
/// # Errors
///
/// Returns a message if the value is not a positive integer.
pub fn parse_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber(s.to_string()).to_string())?;
    if value == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_percent_bounds() {
        assert_eq!(validate_percent("identity", 0.001), Ok(0.001));
        assert_eq!(validate_percent("identity", 100.0), Ok(100.0));
        assert!(validate_percent("identity", -1.0).is_err());
        assert!(validate_percent("identity", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_line_width() {
        assert_eq!(validate_line_width(80), Ok(80));
        assert_eq!(validate_line_width(0), Err(ValidationError::ZeroLineWidth));
    }

    #[test]
    fn test_validate_threads() {
        assert_eq!(validate_threads(4), Ok(4));
        assert_eq!(validate_threads(0), Err(ValidationError::ZeroThreads));
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("95"), Ok(95.0));
        assert_eq!(parse_percent(" 97.5 "), Ok(97.5));
        assert!(parse_percent("abc").is_err());
        assert!(parse_percent("0").is_err());
        assert!(parse_percent("150").is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("8"), Ok(8));
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-2").is_err());
    }
}
