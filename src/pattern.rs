use std::fmt;

use crate::Error;

/// Thin wrapper over `fancy_regex` that keeps backend errors out of the public API.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    backend: fancy_regex::Regex,
}

impl Pattern {
    pub(crate) fn new(pattern: &str) -> Result<Self, PatternError> {
        let backend = fancy_regex::Regex::new(pattern).map_err(PatternError::from)?;
        Ok(Self { backend })
    }

    pub(crate) fn is_match(&self, input: &str) -> Result<bool, PatternError> {
        self.backend.is_match(input).map_err(PatternError::from)
    }

    /// Text of capture group `index` in the first match.
    pub(crate) fn capture(&self, input: &str, index: usize) -> Result<Option<String>, PatternError> {
        let captures = self.backend.captures(input).map_err(PatternError::from)?;
        Ok(captures
            .as_ref()
            .and_then(|captures| captures.get(index))
            .map(|matched| matched.as_str().to_string()))
    }

    /// Replaces the first match only, like a non-global `String.prototype.replace`.
    pub(crate) fn replace_first(
        &self,
        input: &str,
        replacement: &str,
    ) -> Result<String, PatternError> {
        let Some(matched) = self.backend.find(input).map_err(PatternError::from)? else {
            return Ok(input.to_string());
        };
        let mut out = String::with_capacity(input.len() + replacement.len());
        out.push_str(&input[..matched.start()]);
        out.push_str(replacement);
        out.push_str(&input[matched.end()..]);
        Ok(out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PatternError {
    message: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PatternError {}

impl From<fancy_regex::Error> for PatternError {
    fn from(value: fancy_regex::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<PatternError> for Error {
    fn from(value: PatternError) -> Self {
        Error::Pattern(value.message)
    }
}
