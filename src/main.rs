use murmur::cli::{parse_args, run_cli_command, USAGE};
use murmur::startup::init_logging;

use color_eyre::Result;

fn main() -> Result<()> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    color_eyre::install()?;
    init_logging();

    let runtime = tokio::runtime::Runtime::new()?;
    let exit_code = runtime.block_on(run_cli_command(command))?;
    std::process::exit(exit_code)
}
