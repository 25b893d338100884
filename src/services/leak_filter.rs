//! Content filter guarding judge output against technical-detail leaks.
//!
//! Judge-produced statements are free text; nothing stops a model from
//! echoing a stack frame or an exception name it hallucinated. Every
//! statement passes through this filter before it can reach the agent.

use regex::Regex;

/// What the filter found in a rejected statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeakViolation {
    /// A file-path-like substring (`steps/user_steps.py`, `src/api.rs:12`).
    PathLike,
    /// A line-number reference (`line 42`, `:42`).
    LineNumber,
    /// A raw exception class name (`KeyError`, `AssertionError`).
    ExceptionName,
}

impl LeakViolation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PathLike => "path-like substring",
            Self::LineNumber => "line-number reference",
            Self::ExceptionName => "raw exception class name",
        }
    }
}

/// Detects source-level detail in behavioral statements.
#[derive(Debug, Clone)]
pub struct LeakFilter {
    path_pattern: Regex,
    line_pattern: Regex,
    exception_pattern: Regex,
}

impl LeakFilter {
    pub fn new() -> Self {
        Self {
            // Slash-separated path segments or a bare filename with a code
            // extension, optionally carrying a :line suffix.
            path_pattern: Regex::new(
                r"(?x)
                  [\w.\-]+ (?: / [\w.\-]+ )+          # a/b or a/b/c.py
                | \b\w+\.(?:py|rs|js|ts|go|java|rb|c|cpp|h)\b (?: : \d+ )?
                ",
            )
            .expect("path pattern is valid"),
            line_pattern: Regex::new(r"(?i)\bline\s+\d+\b|:\d+\b").expect("line pattern is valid"),
            // CamelCase identifiers ending in Error/Exception, e.g.
            // KeyError, NotImplementedError, NullPointerException.
            exception_pattern: Regex::new(r"\b[A-Z]\w*(?:Error|Exception)\b")
                .expect("exception pattern is valid"),
        }
    }

    /// Check a candidate statement. `Ok(())` means it is safe to deliver.
    pub fn check(&self, statement: &str) -> Result<(), LeakViolation> {
        if self.path_pattern.is_match(statement) {
            return Err(LeakViolation::PathLike);
        }
        if self.line_pattern.is_match(statement) {
            return Err(LeakViolation::LineNumber);
        }
        if self.exception_pattern.is_match(statement) {
            return Err(LeakViolation::ExceptionName);
        }
        Ok(())
    }
}

impl Default for LeakFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_statement_passes() {
        let filter = LeakFilter::new();
        assert!(filter
            .check("The password should be hashed before storage, but it appears to be stored in plaintext.")
            .is_ok());
    }

    #[test]
    fn rejects_path_like_substrings() {
        let filter = LeakFilter::new();
        assert_eq!(
            filter.check("Failure in steps/user_steps.py during creation."),
            Err(LeakViolation::PathLike)
        );
        assert_eq!(
            filter.check("See api.py:15 for the lookup."),
            Err(LeakViolation::PathLike)
        );
    }

    #[test]
    fn rejects_line_number_references() {
        let filter = LeakFilter::new();
        assert_eq!(
            filter.check("The comparison on line 42 did not hold."),
            Err(LeakViolation::LineNumber)
        );
    }

    #[test]
    fn rejects_exception_class_names() {
        let filter = LeakFilter::new();
        assert_eq!(
            filter.check("A KeyError was raised when fetching the user."),
            Err(LeakViolation::ExceptionName)
        );
        assert_eq!(
            filter.check("The method raised NotImplementedError."),
            Err(LeakViolation::ExceptionName)
        );
    }

    #[test]
    fn plain_words_containing_error_are_fine() {
        let filter = LeakFilter::new();
        // Lowercase "error" as a word is behavioral language, not a class.
        assert!(filter
            .check("An error message should be shown when the email is a duplicate.")
            .is_ok());
    }
}
