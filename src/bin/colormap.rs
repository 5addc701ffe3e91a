use grid_puzzle_runner::colormap::{copy_to_clipboard, distinct_chars, ColorTable, Format, Mode};

use arboard::Clipboard;
use colored::Colorize;
use log::{info, warn};
use rand::{thread_rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use structopt_flags::{LogLevel, QuietVerbose};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Color Map Generator",
    about = "Generate character to color tables for grid puzzle inputs"
)]
struct Opt {
    #[structopt(flatten)]
    verbose: QuietVerbose,

    #[structopt(parse(from_os_str), default_value = "input.txt", help = "Puzzle input")]
    input: PathBuf,

    #[structopt(
        short,
        long,
        possible_values = &Mode::variants(),
        help = "Generation mode; asks interactively when omitted"
    )]
    mode: Option<Mode>,

    #[structopt(
        short,
        long,
        default_value = "rust",
        possible_values = &Format::variants(),
        help = "Output format"
    )]
    format: Format,

    #[structopt(short, long, parse(from_os_str), help = "Also write the table to this file")]
    output: Option<PathBuf>,

    #[structopt(long, help = "Random seed")]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    TermLogger::init(
        opt.verbose.get_level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut rng = match opt.seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_rng(thread_rng())?,
    };

    // kept alive for the whole run so the copied table stays available
    let mut clipboard = match Clipboard::new() {
        Ok(clipboard) => Some(clipboard),
        Err(e) => {
            warn!("Clipboard unavailable, tables are only printed: {}", e);
            None
        }
    };

    match opt.mode {
        Some(mode) => generate(&opt, mode, &mut rng, &mut clipboard),
        None => interactive(&opt, &mut rng, &mut clipboard),
    }
}

fn generate(
    opt: &Opt,
    mode: Mode,
    rng: &mut XorShiftRng,
    clipboard: &mut Option<Clipboard>,
) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&opt.input)?;
    let chars = distinct_chars(&text);

    info!("{} distinct characters in {}", chars.len(), opt.input.display());

    let table = ColorTable::generate(mode, &chars, rng);
    let raw = table.render(opt.format)?;

    print_preview(&table);
    println!();
    println!("{}", raw);

    if copy_to_clipboard(clipboard.as_mut(), &raw) {
        println!("{}", "The table has been copied to the clipboard".green());
    }

    if let Some(path) = &opt.output {
        fs::write(path, &raw)?;
        println!("{}", format!("The table has been written to {}", path.display()).green());
    }

    Ok(())
}

fn interactive(
    opt: &Opt,
    rng: &mut XorShiftRng,
    clipboard: &mut Option<Clipboard>,
) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_header();
        println!("Pick color generation mode:");

        for (i, mode) in Mode::ALL.iter().enumerate() {
            println!("  {}) {}", i + 1, mode);
        }

        print!("> ");
        io::stdout().flush()?;

        let choice = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        let choice = choice.trim();
        if choice.is_empty() {
            return Ok(());
        }

        let mode = match choice.parse::<usize>() {
            Ok(index) => index.checked_sub(1).and_then(|i| Mode::ALL.get(i).copied()),
            Err(_) => choice.parse::<Mode>().ok(),
        };

        match mode {
            Some(mode) => generate(opt, mode, rng, clipboard)?,
            None => {
                warn!("Unknown choice {:?}", choice);
                continue;
            }
        }

        println!();
        println!("Press Enter to generate a new color map...");

        if lines.next().transpose()?.is_none() {
            return Ok(());
        }
    }
}

fn print_header() {
    println!("+--------------------------------------------------+");
    println!("|     Color Map Generator For Grid Puzzle Runner   |");
    println!("+--------------------------------------------------+");
    println!();
}

fn print_preview(table: &ColorTable) {
    for (c, rgb) in table.entries() {
        match rgb {
            Some([r, g, b]) => {
                let label = format!(" {:?} [{:>3}, {:>3}, {:>3}] ", c, r, g, b);
                let luminance = 0.299 * *r as f32 + 0.587 * *g as f32 + 0.114 * *b as f32;
                let label = if luminance > 128.0 {
                    label.truecolor(0, 0, 0)
                } else {
                    label.truecolor(255, 255, 255)
                };

                println!("{}", label.on_truecolor(*r, *g, *b));
            }
            None => println!(" {:?} [   ,    ,    ] ", c),
        }
    }
}
