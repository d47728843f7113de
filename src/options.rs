use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Packs UV chart islands into normalized texture sheets")]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(subcommand)]
    pub command: Subcommand,
}

impl Options {
    /// The log filter to use when `RUST_LOG` isn't set.
    pub fn log_filter(&self) -> &'static str {
        match self.global.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// Sets verbosity level. Can be specified multiple times.
    #[structopt(long = "verbose", short, global = true, parse(from_occurrences))]
    pub verbose: u8,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack a list of islands onto a sheet and write the resulting layout.
    Pack(PackOptions),

    /// Check that a layout file has no overlapping islands and fits its sheet.
    Check(CheckOptions),

    /// Render a layout file to a PNG image for inspection.
    Preview(PreviewOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The JSON file listing the islands to pack.
    pub input: PathBuf,

    /// Where to write the packed layout, as JSON.
    #[structopt(long, short)]
    pub output: PathBuf,

    /// The path to a chartpack.toml file, or a folder containing one. Defaults
    /// to the current directory.
    #[structopt(long)]
    pub config: Option<PathBuf>,

    /// The maximum height the packed islands may use. Overrides the config.
    #[structopt(long)]
    pub target_height: Option<f64>,

    /// The minimum gap between islands. Overrides the config.
    #[structopt(long)]
    pub padding: Option<f64>,

    /// How many times to retry with a taller target if the islands don't fit.
    /// Overrides the config.
    #[structopt(long)]
    pub grow_attempts: Option<u32>,

    /// If given, also render the layout to a PNG image at this path.
    #[structopt(long)]
    pub preview: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct CheckOptions {
    /// The layout file to check.
    pub layout: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct PreviewOptions {
    /// The layout file to render.
    pub layout: PathBuf,

    /// Where to write the PNG image.
    #[structopt(long, short)]
    pub output: PathBuf,

    /// The width of the image in pixels. The height follows from the layout.
    #[structopt(long, default_value = "512")]
    pub width: u32,
}
