//! Exec entry points
//!
//! Each entry point runs remap → plan → argv build → terminal exec. On
//! success the process image is replaced and nothing returns; every error
//! path returns a [`ShimError`] carrying the errno for the C caller.

use log::{debug, trace};
use prefix_exec_core::{EnvSnapshot, Result, ShimConfig, ShimError};
use std::borrow::Cow;
use std::convert::Infallible;
use std::ffi::{CStr, CString};

use crate::argv::{ArgvBuf, RawArgv};
use crate::exec::{Envp, Execve};
use crate::linker::select_linker;
use crate::plan::{ExecDisposition, ExecPlan, Planner};
use crate::search;

/// Runs exec requests through the managed-environment pipeline
#[derive(Debug, Clone)]
pub struct Interposer<E> {
    config: ShimConfig,
    exec: E,
}

impl<E: Execve> Interposer<E> {
    pub fn new(config: ShimConfig, exec: E) -> Self {
        Self { config, exec }
    }

    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    /// Plan `path` without executing it
    pub fn plan(&self, env: &EnvSnapshot, path: &str) -> ExecPlan {
        Planner::new(&self.config, env).plan(path)
    }

    /// `execve`: run `path` with `argv` and `envp`
    pub fn exec_exact(&self, path: &CStr, argv: RawArgv<'_>, envp: Envp) -> Result<Infallible> {
        let env = EnvSnapshot::capture(&self.config);
        self.exec_exact_in(&env, path, argv, envp)
    }

    /// `execv`: run `path` with `argv` in the current environment
    pub fn exec_by_argv(&self, path: &CStr, argv: RawArgv<'_>) -> Result<Infallible> {
        self.exec_exact(path, argv, Envp::current())
    }

    /// `execvp`: search for `name` and run it in the current environment
    pub fn exec_search(&self, name: &CStr, argv: RawArgv<'_>) -> Result<Infallible> {
        self.exec_search_env(name, argv, Envp::current())
    }

    /// `execvpe`: search for `name` and run it with `envp`
    pub fn exec_search_env(&self, name: &CStr, argv: RawArgv<'_>, envp: Envp) -> Result<Infallible> {
        let env = EnvSnapshot::capture(&self.config);
        self.exec_search_in(&env, name, argv, envp)
    }

    /// [`Self::exec_exact`] against an explicit environment snapshot
    pub fn exec_exact_in(
        &self,
        env: &EnvSnapshot,
        path: &CStr,
        argv: RawArgv<'_>,
        envp: Envp,
    ) -> Result<Infallible> {
        let Ok(requested) = path.to_str() else {
            trace!("non UTF-8 path {:?}, executing directly", path);
            let argv = ArgvBuf::passthrough(argv)?;
            return Err(self.exec.execve(path, &argv, envp).into());
        };

        let plan = self.plan(env, requested);
        match &plan.disposition {
            ExecDisposition::Direct | ExecDisposition::Passthrough => {
                let program: Cow<'_, CStr> = if plan.remapped {
                    Cow::Owned(CString::new(plan.path).map_err(|_| ShimError::InteriorNul)?)
                } else {
                    Cow::Borrowed(path)
                };
                let argv = ArgvBuf::passthrough(argv)?;
                Err(self.exec.execve(&program, &argv, envp).into())
            }
            wrapped => {
                let linker = select_linker(&self.config);
                let argv = ArgvBuf::build(wrapped, linker, argv)?;
                let program = CString::new(linker).map_err(|_| ShimError::InteriorNul)?;
                debug!("exec via {}: {:?}", linker, argv.to_strings());
                Err(self.exec.execve(&program, &argv, envp).into())
            }
        }
    }

    /// [`Self::exec_search_env`] against an explicit environment snapshot.
    ///
    /// Names containing `/` are executed as paths. Otherwise every search
    /// directory is tried in order; "not found" class failures are skipped,
    /// any other failure is remembered and the search continues. When the list
    /// is exhausted the last remembered failure is returned.
    pub fn exec_search_in(
        &self,
        env: &EnvSnapshot,
        name: &CStr,
        argv: RawArgv<'_>,
        envp: Envp,
    ) -> Result<Infallible> {
        let bytes = name.to_bytes();
        if bytes.is_empty() {
            return Err(ShimError::NotFound("empty program name".to_string()));
        }
        if bytes.contains(&b'/') {
            return self.exec_exact_in(env, name, argv, envp);
        }

        let mut last_error = None;
        for candidate in search::candidates(env.search_list(&self.config), bytes) {
            trace!("trying {:?}", candidate);
            match self.exec_exact_in(env, &candidate, argv, envp) {
                Ok(never) => match never {},
                Err(e) if e.is_not_found() => {}
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ShimError::NotFound(name.to_string_lossy().into_owned())))
    }
}
