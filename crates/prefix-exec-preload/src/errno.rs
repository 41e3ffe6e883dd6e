//! Thread-local errno as seen by C callers

use libc::c_int;
use nix::errno::Errno;

#[cfg(target_os = "android")]
unsafe fn location() -> *mut c_int {
    libc::__errno()
}

#[cfg(not(target_os = "android"))]
unsafe fn location() -> *mut c_int {
    libc::__errno_location()
}

pub fn set(errno: Errno) {
    // SAFETY: the errno location is valid for the lifetime of the calling thread
    unsafe { *location() = errno as c_int };
}
