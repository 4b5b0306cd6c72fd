use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "imagecompress", version, about = "Recompress images locally with a daily free quota")]
pub struct Cli {
    /// Quota store file (defaults to <data dir>/imagecompress/quota.json)
    #[arg(long, global = true, env = "IMAGECOMPRESS_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Downscale to fit 1920x1080 and re-encode as JPEG
    Compress {
        /// Image to compress
        file: PathBuf,

        /// Directory for compressed_<name>.jpg (defaults to the source directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Compress and report sizes without saving the result
        #[arg(long)]
        no_save: bool,
    },

    /// Show today's free compressions
    Status,

    /// Start a premium subscription checkout
    Subscribe {
        /// Checkout session endpoint
        #[arg(
            long,
            env = "IMAGECOMPRESS_CHECKOUT_URL",
            default_value = "http://localhost:3000/api/create-checkout"
        )]
        endpoint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compress() {
        let cli = Cli::parse_from(["imagecompress", "compress", "photo.png", "-o", "out"]);
        match cli.command {
            Command::Compress {
                file,
                out_dir,
                no_save,
            } => {
                assert_eq!(file, PathBuf::from("photo.png"));
                assert_eq!(out_dir, Some(PathBuf::from("out")));
                assert!(!no_save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
