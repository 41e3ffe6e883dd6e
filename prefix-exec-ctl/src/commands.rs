use console::style;
use log::info;
use prefix_exec::{ArgvBuf, EnvSnapshot, ExecDisposition, ExecPlan, Planner, ShimConfig, select_linker};
use serde::Serialize;

/// A planned request together with the argv it would run with
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub requested: String,
    #[serde(flatten)]
    pub plan: ExecPlan,
    pub program: String,
    pub argv: Vec<String>,
}

pub fn build_report(
    config: &ShimConfig,
    env: &EnvSnapshot,
    path: &str,
    args: &[String],
) -> Result<PlanReport, Box<dyn std::error::Error>> {
    let plan = Planner::new(config, env).plan(path);

    let mut original = Vec::with_capacity(args.len() + 1);
    original.push(path.to_string());
    original.extend(args.iter().cloned());
    let original = ArgvBuf::from_args(&original)?;

    let (program, argv) = if plan.disposition.is_wrapped() {
        let linker = select_linker(config);
        let argv = ArgvBuf::build(&plan.disposition, linker, original.as_raw())?;
        (linker.to_string(), argv.to_strings())
    } else {
        (plan.path.clone(), original.to_strings())
    };

    Ok(PlanReport {
        requested: path.to_string(),
        plan,
        program,
        argv,
    })
}

pub fn show_plan(
    config: &ShimConfig,
    path: &str,
    args: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Planning {}", path);
    let env = EnvSnapshot::capture(config);
    let report = build_report(config, &env, path, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let kind = match &report.plan.disposition {
        ExecDisposition::Direct => style("direct").green(),
        ExecDisposition::Passthrough => style("passthrough").green(),
        ExecDisposition::WrapBinary { .. } => style("wrap-binary").cyan().bold(),
        ExecDisposition::WrapScript { .. } => style("wrap-script").cyan().bold(),
    };

    println!("{:12} {}", style("requested").dim(), report.requested);
    if report.plan.remapped {
        println!("{:12} {}", style("remapped").dim(), report.plan.path);
    }
    println!("{:12} {}", style("disposition").dim(), kind);
    println!("{:12} {}", style("program").dim(), report.program);
    for (i, arg) in report.argv.iter().enumerate() {
        println!("{:12} {}", style(format!("argv[{}]", i)).dim(), arg);
    }
    Ok(())
}

pub fn check_environment(config: &ShimConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Checking environment");
    let env = EnvSnapshot::capture(config);
    let mark = |set: bool| if set { "[✓]" } else { "[✗]" };

    println!("Environment:\n");
    println!(
        "{} {} = {}",
        mark(env.root.is_some()),
        config.root_var,
        env.root.as_deref().unwrap_or("(unset)")
    );
    println!(
        "{} {} = {}",
        mark(env.alt_root.is_some()),
        config.alt_root_var,
        env.alt_root.as_deref().unwrap_or("(unset)")
    );
    println!(
        "    search list = {}",
        String::from_utf8_lossy(env.search_list(config))
    );

    let linker = select_linker(config);
    println!("\nLinker:\n");
    println!(
        "{} {}",
        mark(linker == config.linker64),
        config.linker64
    );
    println!("    selected: {}", style(linker).bold());

    println!("\nConfiguration:\n");
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
