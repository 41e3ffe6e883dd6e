//! Length-checked owned strings
//!
//! Paths handed to the kernel are limited to `PATH_MAX` bytes including the
//! terminating NUL. Values that would not fit are rejected with
//! [`ShimError::TooLong`] instead of being cut short.

use crate::error::{Result, ShimError};
use std::fmt;
use std::ops::Deref;

/// Longest path, in bytes, that still leaves room for the terminating NUL
pub const PATH_MAX_LEN: usize = libc::PATH_MAX as usize - 1;

/// An owned UTF-8 string holding at most `MAX` bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedString<const MAX: usize>(String);

/// A string that fits in a kernel path buffer
pub type PathString = BoundedString<PATH_MAX_LEN>;

impl<const MAX: usize> BoundedString<MAX> {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() > MAX {
            return Err(ShimError::TooLong { max: MAX });
        }
        Ok(Self(value))
    }

    /// Build from the concatenation of `parts` without allocating when it would overflow
    pub fn concat(parts: &[&str]) -> Result<Self> {
        let len: usize = parts.iter().map(|p| p.len()).sum();
        if len > MAX {
            return Err(ShimError::TooLong { max: MAX });
        }
        let mut value = String::new();
        value.try_reserve_exact(len)?;
        for part in parts {
            value.push_str(part);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<const MAX: usize> Deref for BoundedString<MAX> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> AsRef<str> for BoundedString<MAX> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> fmt::Display for BoundedString<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exact_limit() {
        let s = BoundedString::<4>::new("abcd").unwrap();
        assert_eq!(s.as_str(), "abcd");
    }

    #[test]
    fn test_rejects_over_limit() {
        let err = BoundedString::<4>::new("abcde").unwrap_err();
        assert!(matches!(err, ShimError::TooLong { max: 4 }));
    }

    #[test]
    fn test_concat() {
        let s = BoundedString::<8>::concat(&["/a", "/", "tool"]).unwrap();
        assert_eq!(&*s, "/a/tool");
        assert!(BoundedString::<6>::concat(&["/a", "/", "tool"]).is_err());
    }

    #[test]
    fn test_path_string_limit() {
        let ok = "a".repeat(PATH_MAX_LEN);
        assert!(PathString::new(ok).is_ok());
        let too_long = "a".repeat(PATH_MAX_LEN + 1);
        assert!(PathString::new(too_long).is_err());
    }
}
