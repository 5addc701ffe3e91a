use grid_puzzle_runner::app::PuzzleApp;
use grid_puzzle_runner::cli::Opt;
use grid_puzzle_runner::Registry;

use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::error::Error;
use std::io;
use structopt::StructOpt;
use structopt_flags::LogLevel;

fn main() -> Result<(), Box<dyn Error>> {
    let opt: Opt = Opt::from_args();

    if let Some(shell) = opt.completions {
        Opt::clap().gen_completions_to("grid-puzzle-runner", shell, &mut io::stdout());
        return Ok(());
    }

    TermLogger::init(
        opt.verbose.get_level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let registry = Registry::builtin();

    if opt.list {
        for name in registry.names() {
            println!("{}", name);
        }

        return Ok(());
    }

    PuzzleApp::new(opt.to_app_config(), registry).run()
}
