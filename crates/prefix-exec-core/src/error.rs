//! Error types for exec interposition

use nix::errno::Errno;
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Result type for exec interposition
pub type Result<T> = std::result::Result<T, ShimError>;

/// Errors that can be reported to a caller of an exec entry point
#[derive(Error, Debug)]
pub enum ShimError {
    #[error("Real execve could not be resolved")]
    Unavailable,

    #[error("Out of memory while building argument vector")]
    OutOfMemory,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("String exceeds {max} bytes")]
    TooLong { max: usize },

    #[error("Argument contains an interior NUL byte")]
    InteriorNul,

    #[error("Exec failed: {0}")]
    Os(#[from] Errno),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ShimError {
    /// The errno a C caller observes for this error
    pub fn errno(&self) -> Errno {
        match self {
            ShimError::Unavailable => Errno::ENOSYS,
            ShimError::OutOfMemory => Errno::ENOMEM,
            ShimError::NotFound(_) => Errno::ENOENT,
            ShimError::TooLong { .. } => Errno::ENAMETOOLONG,
            ShimError::InteriorNul => Errno::EINVAL,
            ShimError::Os(errno) => *errno,
            ShimError::Io(err) => err
                .raw_os_error()
                .map(Errno::from_raw)
                .unwrap_or(Errno::EIO),
        }
    }

    /// Whether a directory search should silently move on to the next candidate
    pub fn is_not_found(&self) -> bool {
        matches!(self.errno(), Errno::ENOENT | Errno::ENOTDIR)
    }
}

impl From<TryReserveError> for ShimError {
    fn from(_: TryReserveError) -> Self {
        ShimError::OutOfMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShimError::Unavailable;
        assert_eq!(err.to_string(), "Real execve could not be resolved");
    }

    #[test]
    fn test_errno_mapping() {
        assert_eq!(ShimError::Unavailable.errno(), Errno::ENOSYS);
        assert_eq!(ShimError::OutOfMemory.errno(), Errno::ENOMEM);
        assert_eq!(ShimError::NotFound("tool".into()).errno(), Errno::ENOENT);
        assert_eq!(ShimError::TooLong { max: 8 }.errno(), Errno::ENAMETOOLONG);
        assert_eq!(ShimError::Os(Errno::EACCES).errno(), Errno::EACCES);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::from_raw_os_error(libc::EPERM);
        let err = ShimError::from(io_err);
        assert!(err.to_string().contains("IO error"));
        assert_eq!(err.errno(), Errno::EPERM);

        let synthetic = ShimError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(synthetic.errno(), Errno::EIO);
    }

    #[test]
    fn test_not_found_class() {
        assert!(ShimError::Os(Errno::ENOENT).is_not_found());
        assert!(ShimError::Os(Errno::ENOTDIR).is_not_found());
        assert!(ShimError::NotFound("x".into()).is_not_found());
        assert!(!ShimError::Os(Errno::EACCES).is_not_found());
        assert!(!ShimError::OutOfMemory.is_not_found());
    }

    #[test]
    fn test_try_reserve_maps_to_oom() {
        let mut v: Vec<u8> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        assert!(matches!(ShimError::from(err), ShimError::OutOfMemory));
    }
}
