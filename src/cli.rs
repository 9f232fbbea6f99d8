use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "iconsmith",
    about = "Generate favicon, Android, iOS, and Windows tile icon sets from a single image"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true, default_value = "iconsmith.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default iconsmith.toml config file
    Init,

    /// Run the icon generation HTTP service
    Serve {
        /// Listen address (overrides the config file)
        #[arg(long)]
        listen: Option<String>,
    },

    /// Generate an icon set from a local image file
    Generate {
        /// Source image (png, jpg, jpeg, or gif)
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "icons-out")]
        output: PathBuf,

        /// Only produce favicon.ico
        #[arg(long)]
        favicon_only: bool,

        /// Stretch to square instead of scale-and-pad
        #[arg(long)]
        stretch: bool,
    },
}
