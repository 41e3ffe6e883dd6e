use console::style;
use log::{debug, info};
use prefix_exec::{ArgvBuf, Interposer, RealExecve, ShimConfig, ShimError};
use std::ffi::CString;

/// Exit status for a program that could not be found
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit status for a program that was found but could not be executed
pub const EXIT_CANNOT_EXECUTE: i32 = 126;

/// Replace this process with `program`; returns only on failure
pub fn run_program(config: ShimConfig, program: &str, args: &[String]) -> ShimError {
    let result = (|| -> Result<std::convert::Infallible, ShimError> {
        let interposer = Interposer::new(config, RealExecve::resolve()?);

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program);
        argv.extend(args.iter().map(String::as_str));
        let argv = ArgvBuf::from_args(&argv)?;
        let name = CString::new(program).map_err(|_| ShimError::InteriorNul)?;

        info!("Executing: {} {:?}", program, args);
        debug!("argv: {:?}", argv.to_strings());
        interposer.exec_search(&name, argv.as_raw())
    })();

    match result {
        Ok(never) => match never {},
        Err(e) => e,
    }
}

pub fn exit_code(err: &ShimError) -> i32 {
    if err.is_not_found() {
        EXIT_NOT_FOUND
    } else {
        EXIT_CANNOT_EXECUTE
    }
}

pub fn report_failure(program: &str, err: &ShimError) -> ! {
    eprintln!("{} {}: {}", style("error:").red().bold(), program, err);
    std::process::exit(exit_code(err));
}
