use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-slim",
    about = "Batch-compress and resize website images in place",
    long_about = "img-slim walks a directory tree, re-encodes every recognized image \
                  (jpg, jpeg, png, gif, bmp, tiff, webp) with the chosen JPEG quality, \
                  downscales anything wider than the maximum width, and prints a size \
                  summary. JPEG and PNG files are overwritten in place; other formats \
                  are rewritten as sibling .jpg files.",
    version,
    after_help = "EXAMPLES:\n  \
    img-slim                      # prompts for everything, targets ./Images\n  \
    img-slim ./assets             # prompts for quality and width\n  \
    img-slim ./assets -y -q 85 -w 1920   # fully scripted, no prompts"
)]
pub struct Args {
    #[arg(help = "Directory to optimize (defaults to an Images directory next to the executable)")]
    pub dir: Option<PathBuf>,

    #[arg(
        short = 'q',
        long,
        help = "JPEG quality (1-100, default: 85)",
        long_help = "JPEG quality from 1 (lowest) to 100 (highest). Out-of-range values \
                     are clamped. When omitted, the tool asks interactively."
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 'w',
        long,
        help = "Maximum width in pixels (default: 1920)",
        long_help = "Images wider than this are downscaled preserving aspect ratio. \
                     Images at or below it are never upscaled. When omitted, the tool \
                     asks interactively."
    )]
    pub max_width: Option<u32>,

    #[arg(
        short = 'y',
        long,
        help = "Skip the overwrite confirmation prompt",
        long_help = "Answers yes to the destructive-overwrite confirmation. Useful for \
                     scripted runs; the quality and width prompts are still shown unless \
                     their flags are given."
    )]
    pub yes: bool,

    #[arg(long, help = "Suppress per-file output and the progress bar")]
    pub quiet: bool,

    #[arg(long, help = "Print extra diagnostic output")]
    pub verbose: bool,
}
