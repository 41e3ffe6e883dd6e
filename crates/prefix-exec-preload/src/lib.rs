//! prefix-exec-preload: C entry points for exec interposition
//!
//! Built as a `cdylib` and injected with `LD_PRELOAD`, this library shadows
//! `execve`, `execv`, `execvp` and `execvpe`. Each call is routed through
//! [`prefix_exec::Interposer`]; the real `execve` is bound with
//! `dlsym(RTLD_NEXT, ...)` the first time it is needed.
//!
//! All entry points follow POSIX conventions: on success they do not return,
//! on failure they return `-1` with `errno` set.

mod errno;
mod logging;

use libc::{c_char, c_int};
use prefix_exec::{Envp, Interposer, RawArgv, RealExecve, Result, ShimConfig};
use std::convert::Infallible;
use std::ffi::CStr;

fn interposer() -> Result<Interposer<RealExecve>> {
    logging::init();
    Ok(Interposer::new(ShimConfig::default(), RealExecve::resolve()?))
}

fn finish(result: Result<Infallible>) -> c_int {
    match result {
        Ok(never) => match never {},
        Err(e) => {
            log::debug!("exec failed: {}", e);
            errno::set(e.errno());
            -1
        }
    }
}

/// # Safety
///
/// Same contract as POSIX `execve`.
#[no_mangle]
pub unsafe extern "C" fn execve(
    path: *const c_char,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> c_int {
    let interposer = match interposer() {
        Ok(interposer) => interposer,
        Err(e) => return finish(Err(e)),
    };
    let envp = Envp::from_ptr(envp);
    if path.is_null() {
        return forward_raw(path, argv, envp);
    }
    finish(interposer.exec_exact(CStr::from_ptr(path), RawArgv::from_ptr(argv), envp))
}

/// # Safety
///
/// Same contract as POSIX `execv`.
#[no_mangle]
pub unsafe extern "C" fn execv(path: *const c_char, argv: *const *const c_char) -> c_int {
    execve(path, argv, Envp::current().as_ptr())
}

/// # Safety
///
/// Same contract as POSIX `execvp`.
#[no_mangle]
pub unsafe extern "C" fn execvp(file: *const c_char, argv: *const *const c_char) -> c_int {
    execvpe(file, argv, Envp::current().as_ptr())
}

/// # Safety
///
/// Same contract as GNU `execvpe`.
#[no_mangle]
pub unsafe extern "C" fn execvpe(
    file: *const c_char,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> c_int {
    let interposer = match interposer() {
        Ok(interposer) => interposer,
        Err(e) => return finish(Err(e)),
    };
    if file.is_null() {
        return finish(Err(prefix_exec::ShimError::NotFound("null program name".to_string())));
    }
    finish(interposer.exec_search_env(
        CStr::from_ptr(file),
        RawArgv::from_ptr(argv),
        Envp::from_ptr(envp),
    ))
}

/// Hand a request the pipeline cannot inspect straight to the real `execve`
unsafe fn forward_raw(path: *const c_char, argv: *const *const c_char, envp: Envp) -> c_int {
    match RealExecve::resolve() {
        Ok(real) => real.call_raw(path, argv, envp),
        Err(e) => finish(Err(e)),
    }
}
