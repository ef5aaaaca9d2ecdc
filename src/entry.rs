use std::io::Write;

use clap::{CommandFactory, FromArgMatches};
use tracing::{error, info};

use callbench::args::{BenchArgs, Command};
use callbench::bench::{MatrixRunner, run_demo};
use callbench::config::{apply_config, load_config};
use callbench::error::{AppError, AppResult};
use callbench::report;
use callbench::request::RequestDescriptor;

pub(crate) fn run() -> AppResult<()> {
    let matches = BenchArgs::command().get_matches();
    let mut args = BenchArgs::from_arg_matches(&matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config).map_err(AppError::config)?;
    }

    let request = args.request_descriptor().map_err(AppError::validation)?;
    info!(
        "Target {} (HTTP {}, timeout {}ms)",
        request.url(),
        request.version(),
        request.timeout().as_millis()
    );

    let result = match args.command.take() {
        Some(Command::Demo(demo)) => run_demo_plan(&args, &request, demo.demo_calls.get()),
        None => run_matrix_plan(&args, &request),
    };
    if let Err(err) = &result {
        error!("Benchmark failed: {}", err);
    }
    result
}

fn run_matrix_plan(args: &BenchArgs, request: &RequestDescriptor) -> AppResult<()> {
    let call_counts = args.call_counts();
    let table = MatrixRunner::with_defaults(args.pool_size.get()).run(request, &call_counts)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report::render(&table).as_bytes())?;
    stdout.flush()?;

    if !args.no_csv {
        report::persist_or_warn(&table, &args.output);
    }
    Ok(())
}

fn run_demo_plan(args: &BenchArgs, request: &RequestDescriptor, calls: usize) -> AppResult<()> {
    let mut stdout = std::io::stdout().lock();
    run_demo(request, calls, args.pool_size.get(), &mut stdout)?;
    Ok(())
}
