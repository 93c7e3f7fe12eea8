use clap::Parser;
use ledwall::cli::{run, Cli};
use ledwall::init_logging_with;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging_with(cli.log_format(), cli.log_level())?;

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}
