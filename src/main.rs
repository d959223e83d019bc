use anyhow::{bail, Context as _, Result};
use clap::Parser;
use std::fs;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gencfg::{
    cli::{Args, ReportMode},
    report::{build_report, TaskRun},
    ContextEnv, GenerationParams, TaskFile,
};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let jobs = collect_jobs(&args)?;

    let mut runs = Vec::with_capacity(jobs.len());
    for (name, params) in jobs {
        if args.check {
            let targets =
                gencfg::check(&params).with_context(|| format!("{name}: check failed"))?;
            for t in targets {
                println!("ok {name}: {}", t.display());
            }
            continue;
        }

        let files = gencfg::generate(&params).with_context(|| format!("{name}: generation failed"))?;
        info!(task = %name, files = files.len(), "task done");
        runs.push(TaskRun { name, files });
    }

    if args.report != ReportMode::Off && !args.check {
        let report = build_report(&runs, args.report);
        match args.report_out.as_ref() {
            Some(p) => fs::write(p, report)
                .with_context(|| format!("failed to write report to {}", p.display()))?,
            None => print!("{report}"),
        }
    }

    Ok(())
}

/// Direct paths (flags or GENCFG_* env) make a single job; otherwise every selected task
/// from the task file, in declaration order.
fn collect_jobs(args: &Args) -> Result<Vec<(String, GenerationParams)>> {
    if args.has_direct_paths() {
        if args.config.is_some() || !args.tasks.is_empty() {
            bail!("--template/--target/--properties cannot be combined with --config/--task");
        }
        let params = GenerationParams {
            template_path: args.template.clone(),
            target_path: args.target.clone(),
            properties_path: args.properties.clone(),
            atomic: args.atomic,
        };
        return Ok(vec![("gencfg".to_string(), params)]);
    }

    let mut ctx = ContextEnv::new()?;
    let Some(path) = ctx.locate_config(args.config.as_deref())? else {
        bail!("no --template/--target/--properties given and no task file found");
    };

    let file = TaskFile::load_from_path(&path)?;
    let mut jobs = Vec::new();
    for task in file.select(&args.tasks)? {
        let mut params = task.to_params(&ctx)?;
        params.atomic |= args.atomic;
        jobs.push((task.name.clone(), params));
    }

    if jobs.is_empty() {
        bail!("task file {} declares no tasks", path.display());
    }

    Ok(jobs)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
