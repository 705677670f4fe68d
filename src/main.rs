use clap::Parser;
use miette::Result;
use rigdef::cli::{Cli, Commands};
use rigdef::output::Printer;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "RIGDEF_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rigdef=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let printer = Printer::new();

    match cli.command {
        Commands::Check(args) => {
            let summary = rigdef::cli::check::run(args, &printer)?;
            if summary.has_errors() {
                std::process::exit(1);
            }
        }
        Commands::Dump(args) => rigdef::cli::dump::run(args, &printer)?,
        Commands::Completions(args) => rigdef::cli::completions::run(args)?,
    }

    Ok(())
}
