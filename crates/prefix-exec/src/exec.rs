//! The terminal exec primitive
//!
//! The pipeline never calls `execve` by name: inside a preloaded library that
//! symbol resolves back to the interposer itself. Instead it is handed an
//! [`Execve`] implementation, normally [`RealExecve`], which binds the next
//! `execve` in symbol lookup order.

use libc::{c_char, c_int};
use log::warn;
use nix::errno::Errno;
use prefix_exec_core::{Result, ShimError};
use std::ffi::CStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::argv::ArgvBuf;

extern "C" {
    static environ: *const *const c_char;
}

/// A C environment vector, passed through to the kernel untouched
#[derive(Debug, Clone, Copy)]
pub struct Envp(*const *const c_char);

impl Envp {
    /// The calling process's environment
    pub fn current() -> Self {
        // SAFETY: reading the libc-maintained pointer; it is not dereferenced here
        Envp(unsafe { environ })
    }

    /// Wrap a caller-supplied `envp`, falling back to the current environment
    /// when it is NULL.
    ///
    /// # Safety
    ///
    /// `envp` must be NULL or a valid NULL-terminated environment vector that
    /// stays alive until the exec call returns.
    pub unsafe fn from_ptr(envp: *const *const c_char) -> Self {
        if envp.is_null() {
            Self::current()
        } else {
            Envp(envp)
        }
    }

    pub fn as_ptr(&self) -> *const *const c_char {
        self.0
    }
}

/// Replaces the process image
pub trait Execve {
    /// Execute `path`. Returns only on failure, with the failure's errno.
    fn execve(&self, path: &CStr, argv: &ArgvBuf<'_>, envp: Envp) -> Errno;
}

impl<T: Execve + ?Sized> Execve for &T {
    fn execve(&self, path: &CStr, argv: &ArgvBuf<'_>, envp: Envp) -> Errno {
        (**self).execve(path, argv, envp)
    }
}

type ExecveFn =
    unsafe extern "C" fn(*const c_char, *const *const c_char, *const *const c_char) -> c_int;

// Written once on successful resolution; zero means "not yet resolved"
static NEXT_EXECVE: AtomicUsize = AtomicUsize::new(0);

/// Handle to the `execve` that follows this library in lookup order
#[derive(Debug, Clone, Copy)]
pub struct RealExecve {
    func: ExecveFn,
}

impl RealExecve {
    /// Resolve (or reuse) the next `execve`. A failed lookup is retried on the
    /// following call.
    pub fn resolve() -> Result<Self> {
        let mut addr = NEXT_EXECVE.load(Ordering::Acquire);
        if addr == 0 {
            // SAFETY: dlsym with a static NUL-terminated symbol name
            addr = unsafe { libc::dlsym(libc::RTLD_NEXT, c"execve".as_ptr()) } as usize;
            if addr == 0 {
                warn!("dlsym(RTLD_NEXT, execve) failed");
                return Err(ShimError::Unavailable);
            }
            NEXT_EXECVE.store(addr, Ordering::Release);
        }
        // SAFETY: addr is the non-null address of a function with execve's signature
        let func = unsafe { std::mem::transmute::<usize, ExecveFn>(addr) };
        Ok(Self { func })
    }

    /// Call the real `execve` with raw pointers, returning its result as-is
    ///
    /// # Safety
    ///
    /// Same contract as POSIX `execve`.
    pub unsafe fn call_raw(
        &self,
        path: *const c_char,
        argv: *const *const c_char,
        envp: Envp,
    ) -> c_int {
        (self.func)(path, argv, envp.as_ptr())
    }
}

impl Execve for RealExecve {
    fn execve(&self, path: &CStr, argv: &ArgvBuf<'_>, envp: Envp) -> Errno {
        // SAFETY: path is NUL-terminated, argv is a NULL-terminated vector of
        // live C strings, envp is a caller-validated environment vector
        unsafe {
            (self.func)(path.as_ptr(), argv.as_ptr(), envp.as_ptr());
        }
        Errno::last()
    }
}
