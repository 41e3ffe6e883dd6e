//! `#!` interpreter line parsing
//!
//! Grammar: `#!`, optional blanks, an absolute interpreter path ending at the
//! first blank or line terminator, optional blanks, then everything up to the
//! line terminator as a single optional argument. A NUL byte ends the text.

use log::trace;
use prefix_exec_core::{PathString, ShimError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Number of leading bytes examined for an interpreter line
pub const SHEBANG_READ_LIMIT: usize = 512;

/// Interpreter declared by a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShebangInfo {
    /// Absolute interpreter path, never empty
    pub interpreter: PathString,
    /// Remainder of the line after the interpreter, unsplit
    pub arg: Option<PathString>,
}

/// Reasons a file is not treated as a script
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShebangError {
    #[error("file could not be read")]
    Unreadable,

    #[error("file is shorter than an interpreter line")]
    TooShort,

    #[error("missing #! marker")]
    NoMagic,

    #[error("interpreter is not an absolute path")]
    NotAbsolute,

    #[error("interpreter line is not valid UTF-8")]
    NotUtf8,

    #[error("{0} exceeds the maximum length")]
    TooLong(&'static str),
}

/// Read the head of `path` and parse its interpreter line
pub fn parse_shebang(path: impl AsRef<Path>) -> Result<ShebangInfo, ShebangError> {
    let path = path.as_ref();
    let mut head = Vec::with_capacity(SHEBANG_READ_LIMIT);
    let read = File::open(path)
        .and_then(|file| file.take(SHEBANG_READ_LIMIT as u64).read_to_end(&mut head));
    if let Err(e) = read {
        trace!("shebang probe {}: {}", path.display(), e);
        return Err(ShebangError::Unreadable);
    }
    parse_shebang_bytes(&head)
}

/// Parse an interpreter line from the leading bytes of a file
pub fn parse_shebang_bytes(head: &[u8]) -> Result<ShebangInfo, ShebangError> {
    if head.len() < 3 {
        return Err(ShebangError::TooShort);
    }
    let text = match head.iter().position(|&b| b == 0) {
        Some(nul) => &head[..nul],
        None => head,
    };

    let rest = text.strip_prefix(b"#!").ok_or(ShebangError::NoMagic)?;
    let rest = skip_blanks(rest);
    if rest.first() != Some(&b'/') {
        return Err(ShebangError::NotAbsolute);
    }

    let end = rest
        .iter()
        .position(|&b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
        .unwrap_or(rest.len());
    let interpreter = bounded(&rest[..end], "interpreter")?;

    let rest = skip_blanks(&rest[end..]);
    let arg_end = rest
        .iter()
        .position(|&b| matches!(b, b'\n' | b'\r'))
        .unwrap_or(rest.len());
    let arg = if arg_end > 0 {
        Some(bounded(&rest[..arg_end], "argument")?)
    } else {
        None
    };

    Ok(ShebangInfo { interpreter, arg })
}

fn skip_blanks(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn bounded(bytes: &[u8], what: &'static str) -> Result<PathString, ShebangError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ShebangError::NotUtf8)?;
    PathString::new(text).map_err(|e| match e {
        ShimError::TooLong { .. } => ShebangError::TooLong(what),
        _ => ShebangError::Unreadable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(text: &str) -> Result<ShebangInfo, ShebangError> {
        parse_shebang_bytes(text.as_bytes())
    }

    #[test]
    fn test_interpreter_with_argument() {
        let info = parse("#!/managed/root/bin/python3 -u\nprint(1)\n").unwrap();
        assert_eq!(info.interpreter.as_str(), "/managed/root/bin/python3");
        assert_eq!(info.arg.as_deref(), Some("-u"));
    }

    #[test]
    fn test_interpreter_without_argument() {
        let info = parse("#!/system/bin/sh\necho hi\n").unwrap();
        assert_eq!(info.interpreter.as_str(), "/system/bin/sh");
        assert!(info.arg.is_none());
    }

    #[test]
    fn test_leading_blanks_are_skipped() {
        let info = parse("#! \t/usr/bin/env  python3\n").unwrap();
        assert_eq!(info.interpreter.as_str(), "/usr/bin/env");
        assert_eq!(info.arg.as_deref(), Some("python3"));
    }

    #[test]
    fn test_argument_is_not_split() {
        let info = parse("#!/usr/bin/env -S awk -f \n").unwrap();
        assert_eq!(info.arg.as_deref(), Some("-S awk -f "));
    }

    #[test]
    fn test_crlf_terminator() {
        let info = parse("#!/bin/sh -e\r\n").unwrap();
        assert_eq!(info.interpreter.as_str(), "/bin/sh");
        assert_eq!(info.arg.as_deref(), Some("-e"));
    }

    #[test]
    fn test_trailing_blanks_without_argument() {
        let info = parse("#!/bin/sh   \n").unwrap();
        assert!(info.arg.is_none());
    }

    #[test]
    fn test_no_terminator() {
        let info = parse("#!/bin/sh").unwrap();
        assert_eq!(info.interpreter.as_str(), "/bin/sh");
    }

    #[test]
    fn test_relative_interpreter_rejected() {
        assert_eq!(parse("#!sh\n"), Err(ShebangError::NotAbsolute));
        assert_eq!(parse("#!   \n"), Err(ShebangError::NotAbsolute));
    }

    #[test]
    fn test_missing_magic() {
        assert_eq!(parse("echo hi\n"), Err(ShebangError::NoMagic));
        assert_eq!(parse("\x7fELF"), Err(ShebangError::NoMagic));
    }

    #[test]
    fn test_short_input_rejected() {
        assert_eq!(parse(""), Err(ShebangError::TooShort));
        assert_eq!(parse("#"), Err(ShebangError::TooShort));
        assert_eq!(parse("#!"), Err(ShebangError::TooShort));
    }

    #[test]
    fn test_nul_ends_text() {
        assert_eq!(
            parse_shebang_bytes(b"#!/bin/sh\0 -x\n"),
            Ok(ShebangInfo {
                interpreter: PathString::new("/bin/sh").unwrap(),
                arg: None,
            })
        );
        assert_eq!(parse_shebang_bytes(b"#\0!/bin/sh\n"), Err(ShebangError::NoMagic));
    }

    #[test]
    fn test_non_utf8_interpreter_rejected() {
        assert_eq!(parse_shebang_bytes(b"#!/bin/\xff\n"), Err(ShebangError::NotUtf8));
    }

    #[test]
    fn test_reads_only_bounded_prefix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("long");
        let mut body = b"#!/".to_vec();
        body.extend(std::iter::repeat(b'a').take(SHEBANG_READ_LIMIT * 2));
        fs::write(&path, &body).unwrap();

        let info = parse_shebang(&path).unwrap();
        assert_eq!(info.interpreter.len(), SHEBANG_READ_LIMIT - 2);
    }

    #[test]
    fn test_parses_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("script");
        fs::write(&path, "#!/managed/root/bin/python3 -u\nprint(1)\n").unwrap();
        let info = parse_shebang(&path).unwrap();
        assert_eq!(info.interpreter.as_str(), "/managed/root/bin/python3");
        assert_eq!(info.arg.as_deref(), Some("-u"));
    }

    #[test]
    fn test_missing_and_tiny_files() {
        let dir = tempdir().unwrap();
        assert_eq!(parse_shebang(dir.path().join("missing")), Err(ShebangError::Unreadable));

        let one = dir.path().join("one");
        fs::write(&one, b"#").unwrap();
        assert_eq!(parse_shebang(&one), Err(ShebangError::TooShort));
    }
}
