use anyhow::Result;
use clap::Parser;
use filter_rural::{
    cli::{parse_error_exit_code, Cli},
    error::exit_code_for,
    pipeline,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // ─── 1) parse args ───────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(parse_error_exit_code(&err));
        }
    };

    // ─── 2) init logging (stderr: stdout may carry the CSV) ──────────
    let fallback = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 3) run ──────────────────────────────────────────────────────
    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = cli.into_run_config()?;
    let summary = pipeline::run(&cfg)?;
    match &summary.column {
        Some(column) => eprintln!(
            "matched {} of {} rows (column: {})",
            summary.matched_rows, summary.total_rows, column
        ),
        None => eprintln!(
            "matched {} of {} rows",
            summary.matched_rows, summary.total_rows
        ),
    }
    if let Some(out) = &cfg.output {
        info!(path = %out.display(), "wrote output");
    }
    Ok(())
}
