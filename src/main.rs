use clap::{Parser, Subcommand};
use pgm_interlace::cli::{combine_slices, show_info, split_image, CombineOptions, SplitOptions};
use pgm_interlace::{EofPolicy, Orientation};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("PGM_INTERLACE_VERSION");
const PROFILE: &str = env!("PGM_INTERLACE_PROFILE");
const GIT_HASH: &str = env!("PGM_INTERLACE_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "pgm-interlace")]
#[command(author, about = "Reassemble a square PGM image from interlaced slices", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine slices into one image
    #[command(alias = "c")]
    Combine {
        /// Slice files, in slice order
        #[arg(required = true)]
        slices: Vec<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pad missing pixels with this byte instead of failing (column slices only)
        #[arg(long, value_parser = parse_byte)]
        pad: Option<u8>,
    },

    /// Split a square image into interlaced slices
    #[command(alias = "s")]
    Split {
        /// Image to split
        input: PathBuf,

        /// Number of slices
        #[arg(short = 'n', long, default_value = "2")]
        slices: usize,

        /// Interlace by rows or columns
        #[arg(long, default_value = "rows", value_parser = parse_orientation)]
        orientation: Orientation,

        /// Output prefix; slices are named <prefix>.<index>.pgm
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate slices and describe the combined image
    #[command(alias = "i")]
    Info {
        /// Slice files, in slice order
        #[arg(required = true)]
        slices: Vec<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_orientation(s: &str) -> Result<Orientation, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("expected a byte value (0-255 or 0x00-0xff), got {}", s))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("pgm_interlace=info,warn"),
    )
    .init();

    let cli = Cli::parse();

    if cli.version {
        println!("pgm-interlace {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Combine {
            slices,
            output,
            pad,
        } => {
            let options = CombineOptions {
                output,
                eof_policy: pad.map_or(EofPolicy::Fatal, EofPolicy::Pad),
            };

            // stdout carries the image itself, so only confirm file output
            combine_slices(&slices, &options).map(|geometry| {
                if let Some(path) = &options.output {
                    println!(
                        "Wrote {}x{} image to {}",
                        geometry.size,
                        geometry.size,
                        path.display()
                    );
                }
            })
        }

        Commands::Split {
            input,
            slices,
            orientation,
            output,
        } => {
            let options = SplitOptions {
                slices,
                orientation,
                prefix: output,
            };

            split_image(&input, &options).map(|paths| {
                for path in paths {
                    println!("{}", path.display());
                }
            })
        }

        Commands::Info { slices, json } => show_info(&slices, json).map(|info| print!("{}", info)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
