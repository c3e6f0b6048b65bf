use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// Paths that flow into templates or placeholder interpolation must be
    /// valid UTF-8, so this is checked up front instead of converted lossily.
    ///
    /// # Examples
    /// ```
    /// use kiln::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Config(format!(
                "path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_to_str_checked_valid() {
        let path = Path::new("valid_path");
        assert_eq!(path.to_str_checked().unwrap(), "valid_path");
    }

    #[test]
    fn test_to_str_checked_nested() {
        let path = Path::new("some/nested/path.html");
        assert_eq!(path.to_str_checked().unwrap(), "some/nested/path.html");
    }
}
