use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod cardlist;
mod common;
mod config;
mod image;
mod pdf;

#[derive(Parser)]
#[command(name = "cardt", about = "Card game print sheet tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out card images on printable PDF sheets
    Pdf(PdfArgs),

    /// Rotate, resize and add or crop bleed on card images
    Image(ImageArgs),

    /// Write a card list block for use with `pdf --list`
    Cardlist(CardlistArgs),

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,

        /// Use the config file of a game
        #[arg(short, long, global = true)]
        game: Option<String>,

        /// Config file to use instead of the default location
        #[arg(long, global = true, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

/// Where settings come from, shared by commands that read the config file
#[derive(Args, Debug, Clone, Default)]
pub struct ConfArgs {
    /// Read defaults from the config file
    #[arg(short = 'c', long = "conf")]
    pub conf: bool,

    /// Config file to use instead of the default location (implies --conf)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use the config file of a game (implies --conf)
    #[arg(short, long)]
    pub game: Option<String>,

    /// Profile in the config file (implies --conf)
    #[arg(short, long)]
    pub profile: Option<String>,
}

#[derive(Args, Debug)]
pub struct PdfArgs {
    /// Card front images, or directories of them
    #[arg(value_name = "IMAGE")]
    pub images: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Replace the output file if it exists
    #[arg(long)]
    pub overwrite: bool,

    /// Card list file (may be repeated)
    #[arg(short, long = "list", value_name = "FILE")]
    pub lists: Vec<PathBuf>,

    /// Read a card list from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Paper size
    #[arg(long, value_enum)]
    pub pagesize: Option<PaperArg>,

    /// Card bleed in mm
    #[arg(long)]
    pub bleed: Option<f32>,

    /// Card width in mm
    #[arg(long)]
    pub width: Option<f32>,

    /// Card height in mm
    #[arg(long)]
    pub height: Option<f32>,

    /// Resolution card images are prepared at
    #[arg(long)]
    pub dpi: Option<f32>,

    /// Page margin in mm
    #[arg(long)]
    pub margin: Option<f32>,

    /// Minimum spacing between cards in mm
    #[arg(long)]
    pub spacing: Option<f32>,

    /// Distance from the fold line to the cards in mm
    #[arg(long)]
    pub fold: Option<f32>,

    /// Bleed included in the front images in mm
    #[arg(long, default_value = "0")]
    pub front_bleed: f32,

    /// Card back image used with IMAGE arguments
    #[arg(short, long)]
    pub back: Option<PathBuf>,

    /// Bleed included in the back image in mm
    #[arg(long)]
    pub back_bleed: Option<f32>,

    /// Do not rotate images to the card's aspect
    #[arg(long)]
    pub no_rotate: bool,

    /// Direction used when rotating to the card's aspect
    #[arg(long, value_enum, default_value = "anticlockwise")]
    pub rotate_dir: RotateArg,

    /// Fronts and backs on separate pages for duplex printing
    #[arg(long)]
    pub twosided: bool,

    /// Direction the paper is fed for duplex printing
    #[arg(long, value_enum)]
    pub feed_dir: Option<FeedArg>,

    /// Only print card fronts
    #[arg(long, conflicts_with = "only_back")]
    pub only_front: bool,

    /// Only print card backs
    #[arg(long)]
    pub only_back: bool,

    /// Shift back pages right by this many mm (two-sided)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub back_offset_x: f32,

    /// Shift back pages down by this many mm (two-sided)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub back_offset_y: f32,

    #[command(flatten)]
    pub conf: ConfArgs,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    pub stats_only: bool,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("target").required(true).args(["output", "prefix"])
))]
pub struct ImageArgs {
    /// Source images, or directories of them
    #[arg(value_name = "IMAGE", required = true)]
    pub images: Vec<PathBuf>,

    /// Output file (single input image only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write each result next to its input, named PREFIX + input name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Rotate images whose aspect differs from this one
    #[arg(short = 'a', long, value_enum, conflicts_with = "rotate_all")]
    pub rotate_to_aspect: Option<AspectArg>,

    /// Rotate every image
    #[arg(long)]
    pub rotate_all: bool,

    /// Rotation direction
    #[arg(long, value_enum, default_value = "anticlockwise")]
    pub rotate_dir: RotateArg,

    /// Set the physical size to --width x --height (after rotating)
    #[arg(short, long)]
    pub resize: bool,

    /// Width in mm used by --resize
    #[arg(short = 'W', long, default_value = "61.5")]
    pub width: f32,

    /// Height in mm used by --resize
    #[arg(short = 'H', long, default_value = "88")]
    pub height: f32,

    /// Bleed to add in mm; negative values crop
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub bleed: f32,

    /// Resolution of the input images
    #[arg(long, default_value = "300")]
    pub dpi: f32,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct CardlistArgs {
    /// Card front images, or directories of them
    #[arg(value_name = "IMAGE")]
    pub images: Vec<PathBuf>,

    /// Bleed included in the front images in mm
    #[arg(long, default_value = "0")]
    pub front_bleed: f32,

    /// Card back image
    #[arg(long)]
    pub back: Option<PathBuf>,

    /// Bleed included in the back image in mm
    #[arg(long)]
    pub back_bleed: Option<f32>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append to the output file
    #[arg(long)]
    pub append: bool,

    /// Pass a card list on stdin through to the output
    #[arg(long)]
    pub stdin: bool,

    /// Write this block before the stdin content rather than after
    #[arg(long, requires = "stdin")]
    pub first: bool,

    #[command(flatten)]
    pub conf: ConfArgs,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Report every problem in the config file
    Check,
    /// Create an empty config file if none exists
    Init,
    /// Print the settings a profile resolves to
    Show {
        /// Profile to resolve
        #[arg(short, long)]
        profile: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PaperArg {
    A3,
    A4,
    Letter,
    Tabloid,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FeedArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RotateArg {
    Clockwise,
    Anticlockwise,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AspectArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for card_layout::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<FeedArg> for card_layout::FeedDirection {
    fn from(arg: FeedArg) -> Self {
        match arg {
            FeedArg::Portrait => Self::Portrait,
            FeedArg::Landscape => Self::Landscape,
        }
    }
}

impl From<RotateArg> for card_image::RotateDirection {
    fn from(arg: RotateArg) -> Self {
        match arg {
            RotateArg::Clockwise => Self::Clockwise,
            RotateArg::Anticlockwise => Self::Anticlockwise,
        }
    }
}

impl From<AspectArg> for card_layout::Orientation {
    fn from(arg: AspectArg) -> Self {
        match arg {
            AspectArg::Portrait => Self::Portrait,
            AspectArg::Landscape => Self::Landscape,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pdf(args) => pdf::run(args).await,
        Commands::Image(args) => image::run(args).await,
        Commands::Cardlist(args) => cardlist::run(args).await,
        Commands::Config {
            action,
            game,
            config,
        } => config::run(action, game, config).await,
    }
}
