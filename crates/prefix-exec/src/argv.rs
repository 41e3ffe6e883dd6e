//! Argument vector construction
//!
//! Original arguments are carried over by pointer, so elements at index 1
//! and above keep their identity. Every built vector is NULL-terminated and
//! allocated to exactly its final length.

use libc::c_char;
use prefix_exec_core::{Result, ShimError};
use std::ffi::{CStr, CString};
use std::marker::PhantomData;

use crate::plan::ExecDisposition;

/// A borrowed, NULL-terminated C argument vector
#[derive(Debug, Clone, Copy)]
pub struct RawArgv<'a> {
    args: &'a [*const c_char],
}

impl<'a> RawArgv<'a> {
    /// Wrap a C `argv`. A NULL `argv` is an empty vector.
    ///
    /// # Safety
    ///
    /// `argv` must be NULL or point to a NULL-terminated array of valid C
    /// strings that outlive `'a`.
    pub unsafe fn from_ptr(argv: *const *const c_char) -> Self {
        if argv.is_null() {
            return Self::empty();
        }
        let mut argc = 0;
        while !(*argv.add(argc)).is_null() {
            argc += 1;
        }
        Self {
            args: std::slice::from_raw_parts(argv, argc),
        }
    }

    pub fn empty() -> Self {
        Self { args: &[] }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Pointers to `argv[1..]`
    pub fn tail(&self) -> &'a [*const c_char] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn as_slice(&self) -> &'a [*const c_char] {
        self.args
    }

    pub fn get(&self, index: usize) -> Option<&'a CStr> {
        // SAFETY: every element is a valid C string for 'a (from_ptr contract
        // or ArgvBuf invariant)
        self.args.get(index).map(|&p| unsafe { CStr::from_ptr(p) })
    }
}

/// An owned, NULL-terminated argument vector ready for `execve`
#[derive(Debug)]
pub struct ArgvBuf<'a> {
    // Heap buffers of CString never move, so pointers into them stay valid
    owned: Vec<CString>,
    ptrs: Vec<*const c_char>,
    _borrowed: PhantomData<&'a CStr>,
}

impl<'a> ArgvBuf<'a> {
    /// Build the vector implied by `disposition`.
    ///
    /// - `Direct` / `Passthrough`: `original` unchanged
    /// - `WrapBinary`: `[linker, target, original[1..]]`
    /// - `WrapScript`: `[linker, interpreter, arg?, script, original[1..]]`
    pub fn build(disposition: &ExecDisposition, linker: &str, original: RawArgv<'a>) -> Result<Self> {
        match disposition {
            ExecDisposition::Direct | ExecDisposition::Passthrough => Self::passthrough(original),
            ExecDisposition::WrapBinary { target } => {
                Self::with_prefix(&[linker, target.as_str()], original.tail())
            }
            ExecDisposition::WrapScript {
                interpreter,
                arg,
                script,
            } => match arg {
                Some(arg) => Self::with_prefix(
                    &[linker, interpreter.as_str(), arg.as_str(), script.as_str()],
                    original.tail(),
                ),
                None => Self::with_prefix(
                    &[linker, interpreter.as_str(), script.as_str()],
                    original.tail(),
                ),
            },
        }
    }

    /// Copy `original` as-is
    pub fn passthrough(original: RawArgv<'a>) -> Result<Self> {
        Self::with_prefix(&[], original.as_slice())
    }

    fn with_prefix(prefix: &[&str], rest: &'a [*const c_char]) -> Result<Self> {
        let mut owned = Vec::new();
        owned.try_reserve_exact(prefix.len())?;
        for arg in prefix {
            owned.push(CString::new(*arg).map_err(|_| ShimError::InteriorNul)?);
        }

        let mut ptrs = Vec::new();
        ptrs.try_reserve_exact(prefix.len() + rest.len() + 1)?;
        ptrs.extend(owned.iter().map(|s| s.as_ptr()));
        ptrs.extend_from_slice(rest);
        ptrs.push(std::ptr::null());

        Ok(Self {
            owned,
            ptrs,
            _borrowed: PhantomData,
        })
    }

    /// Number of arguments, excluding the terminating NULL
    pub fn len(&self) -> usize {
        self.ptrs.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_ptr(&self) -> *const *const c_char {
        self.ptrs.as_ptr()
    }

    /// Borrow as a [`RawArgv`], e.g. to feed an entry point
    pub fn as_raw(&self) -> RawArgv<'_> {
        RawArgv {
            args: &self.ptrs[..self.len()],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CStr> + '_ {
        let raw = self.as_raw();
        (0..raw.len()).filter_map(move |i| raw.get(i))
    }

    /// Lossy UTF-8 copy of the arguments, for display
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|s| s.to_string_lossy().into_owned()).collect()
    }

    /// Number of arguments this vector injected in front of the originals
    pub fn injected(&self) -> usize {
        self.owned.len()
    }
}

impl ArgvBuf<'static> {
    /// Own a vector built from Rust strings
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let prefix: Vec<&str> = args.iter().map(|s| s.as_ref()).collect();
        Self::with_prefix(&prefix, &[])
    }
}
