use std::process::ExitCode;

use env_logger::Env;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod util;

fn main() -> ExitCode {
    init_logging();

    let cli = cli::parse();
    let ctx = display::Context::for_run(cli.command.io().quiet);
    if ctx.interactive {
        display::print_banner();
    }

    if let Err(e) = commands::dispatch(cli.command, ctx) {
        display::print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Library diagnostics are opt-in through `RUST_LOG`; only errors by default.
fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("error"))
        .format_timestamp(None)
        .init();
}
