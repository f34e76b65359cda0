use anyhow::Context;
use clap::Parser;
use img_slim::cli::Args;
use img_slim::constants::DEFAULT_IMAGES_DIR;
use img_slim::processing::OptimizeOptions;
use img_slim::{batch, error, info, logger, prompt};
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    // Ctrl-C aborts the run immediately: no cleanup of partially written
    // files, just a message and a clean exit.
    ctrlc::set_handler(|| {
        println!("\n\nOptimization cancelled by user.");
        std::process::exit(0);
    })
    .context("failed to install the interrupt handler")?;

    info!("{}", "=".repeat(60));
    info!("Website Image Optimization Tool");
    info!("{}", "=".repeat(60));

    let target = match args.dir.clone() {
        Some(dir) => dir,
        None => default_images_dir()?,
    };

    // Missing target is a user-facing message, not a failure exit.
    if !target.is_dir() {
        error!("Images directory not found at {}", target.display());
        info!("Pass a directory argument or run the tool next to an {} directory.", DEFAULT_IMAGES_DIR);
        return Ok(());
    }

    info!("\nThis will optimize all images in: {}", target.display());
    info!("Original images will be overwritten!");

    if !args.yes && !prompt::confirm("\nDo you want to continue? (yes/no): ")? {
        println!("Optimization cancelled.");
        return Ok(());
    }

    let quality = match args.quality {
        Some(q) => Some(q),
        None => Some(prompt::read_quality()?),
    };
    let max_width = match args.max_width {
        Some(w) => Some(w),
        None => Some(prompt::read_max_width()?),
    };
    let options = OptimizeOptions::new(quality, max_width);

    let summary = batch::optimize_directory(&target, &options)
        .with_context(|| format!("failed to optimize {}", target.display()))?;
    batch::print_summary(&summary);

    info!("\n{}", "=".repeat(60));
    info!("Optimization complete!");
    info!("{}", "=".repeat(60));

    Ok(())
}

fn default_images_dir() -> anyhow::Result<PathBuf> {
    let exe = env::current_exe().context("failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("executable path has no parent directory")?;
    Ok(dir.join(DEFAULT_IMAGES_DIR))
}
