//! Parsing of the comma-separated output format list.

use std::fmt;
use std::ops::Deref;

use super::error::{Error, Result};

/// Ordered, immutable list of requested archive formats.
///
/// Tokens are kept exactly as parsed: duplicates produce duplicate archives
/// and empty tokens survive parsing (see [`Formats::validate`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formats(Box<[String]>);

impl Formats {
    /// Returns the formats as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Rejects empty-after-trim tokens.
    ///
    /// An unnamed format is meaningless to the archiver, so this runs at the
    /// driver boundary before any descriptor is read.
    pub fn validate(&self) -> Result<()> {
        if let Some(position) = self.0.iter().position(|f| f.is_empty()) {
            return Err(Error::Configuration(format!(
                "Format #{} in '{}' is empty",
                position + 1,
                self
            )));
        }
        Ok(())
    }
}

impl Deref for Formats {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Formats {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Formats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// Splits `raw` on commas and trims every token.
///
/// Fails only when no format list was supplied at all.
pub fn parse_formats(raw: Option<&str>) -> Result<Formats> {
    let raw = raw.ok_or_else(|| {
        Error::Configuration("Required parameter 'formats' was not supplied".to_string())
    })?;

    let formats: Vec<String> = raw.split(',').map(|token| token.trim().to_string()).collect();
    Ok(Formats(formats.into_boxed_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> Vec<String> {
        parse_formats(Some(raw)).unwrap().to_vec()
    }

    #[test]
    fn single_format() {
        assert_eq!(parsed("tar.gz"), vec!["tar.gz"]);
    }

    #[test]
    fn trims_and_preserves_order() {
        assert_eq!(parsed(" zip ,tar.gz,  tar"), vec!["zip", "tar.gz", "tar"]);
    }

    #[test]
    fn keeps_duplicates_and_empty_tokens() {
        assert_eq!(parsed("zip,, zip ,"), vec!["zip", "", "zip", ""]);
    }

    #[test]
    fn matches_split_then_trim_for_arbitrary_input() {
        for raw in ["a,b", "  ", ",", "x , y,,z ", "\ttar\t,\nzip"] {
            let expected: Vec<String> = raw.split(',').map(|s| s.trim().to_string()).collect();
            assert_eq!(parsed(raw), expected, "input {raw:?}");
        }
    }

    #[test]
    fn empty_string_is_one_empty_token() {
        let formats = parse_formats(Some("")).unwrap();
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0], "");
        assert!(matches!(formats.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn absent_value_is_configuration_error() {
        assert!(matches!(parse_formats(None), Err(Error::Configuration(_))));
    }

    #[test]
    fn validate_accepts_named_formats() {
        assert!(parse_formats(Some("zip,tar.gz")).unwrap().validate().is_ok());
    }
}
