use clap::Parser;
use tracing_subscriber::EnvFilter;

use mazestep::{app::App, cli::Cli, maze::Grid};

/// Logs go to a file since the terminal is in raw mode while the app runs.
fn init_logging(cli: &Cli) -> tracing_appender::non_blocking::WorkerGuard {
    let directory = cli
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = cli
        .log_file
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("mazestep.log"));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    if let Err(err) = cli.validate() {
        err.exit();
    }
    let _guard = init_logging(&cli);

    let mut app = App::new(Grid::new(cli.width, cli.height), cli.rng(), cli.settings())
        .with_selection(cli.generator, cli.solver, cli.heuristic);

    if cli.headless {
        let summary = app.run_headless();
        print!("{}", app.grid());
        println!("{}", summary);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;
    result
}
