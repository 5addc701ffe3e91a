#[cfg(feature = "sdl2")]
use crate::grid::Size;
#[cfg(feature = "sdl2")]
use crate::render::sdl_renderer::SdlConfig;
use crate::state::{parse_step_interval, RunConfig};

use std::path::PathBuf;
use std::time::Duration;
use structopt::clap::Shell;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;

fn parse_interval(s: &str) -> Result<Duration, String> {
    parse_step_interval(s).ok_or(format!("invalid step interval: {}", s))
}

#[derive(Debug)]
pub struct AppConfig {
    pub puzzle: Option<String>,
    pub run: RunConfig,
    pub headless: bool,
    pub output_path: Option<PathBuf>,
    #[cfg(feature = "sdl2")]
    pub window: SdlConfig,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Grid Puzzle Runner",
    about = "Step through grid puzzle algorithms and watch them run"
)]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(short, long, help = "Puzzle to load on startup (defaults to the first registered)")]
    puzzle: Option<String>,

    #[structopt(short, long, help = "List registered puzzles and exit")]
    pub list: bool,

    #[structopt(
        long,
        parse(try_from_str = parse_interval),
        default_value = "100",
        help = "Delay between timed steps in milliseconds"
    )]
    interval: Duration,

    #[structopt(long, default_value = "18", help = "Pixels per grid cell")]
    scale: f32,

    #[structopt(long, help = "Run to completion without a window and print the result")]
    headless: bool,

    #[structopt(short, long, parse(from_os_str), help = "Save the final frame to this image file")]
    output: Option<PathBuf>,

    #[cfg(feature = "sdl2")]
    #[structopt(
        parse(try_from_str),
        long,
        default_value = "1500x1000",
        help = "Window size"
    )]
    window_size: Size,

    #[cfg(feature = "sdl2")]
    #[structopt(long, help = "Turns on vsync")]
    vsync: bool,

    #[cfg(feature = "sdl2")]
    #[structopt(short, long, help = "Runs the application in full screen")]
    fullscreen: bool,

    #[structopt(long, possible_values= &Shell::variants(), case_insensitive = true, help = "Generate shell completions and exit")]
    pub completions: Option<Shell>,
}

impl Opt {
    pub fn to_app_config(self) -> AppConfig {
        AppConfig {
            puzzle: self.puzzle,
            run: RunConfig {
                step_interval: self.interval,
                scale: self.scale,
            }
            .clamped(),
            headless: self.headless,
            output_path: self.output,
            #[cfg(feature = "sdl2")]
            window: SdlConfig {
                window_size: self.window_size,
                vsync: self.vsync,
                fullscreen: self.fullscreen,
            },
        }
    }
}
