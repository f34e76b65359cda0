use crate::error::{OptimizeError, Result};
use crate::processing::{optimize_image, OptimizeOptions};
use crate::utils::{calculate_reduction, format_file_size, is_image_file};
use crate::{error, info, verbose, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Running totals for one walk. Lives only until the summary is printed.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    /// Sum of the original sizes of every recognized file, including
    /// ones that later failed to optimize.
    pub total_original: u64,
    /// Sum of the on-disk sizes of successfully optimized files.
    pub total_optimized: u64,
}

impl RunSummary {
    pub fn reduction_percent(&self) -> f64 {
        calculate_reduction(self.total_original, self.total_optimized)
    }

    pub fn bytes_saved(&self) -> u64 {
        self.total_original.saturating_sub(self.total_optimized)
    }
}

/// Recursively collects every file under `root` whose extension is on the
/// image allow-list. Sorted by file name for a stable processing order.
/// Unreadable entries are warned about and skipped, never fatal.
pub fn collect_image_files(root: &Path) -> Vec<PathBuf> {
    let mut image_files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            image_files.push(path.to_path_buf());
        }
    }

    image_files
}

/// Walks `root`, optimizing every recognized image in place, one file at
/// a time. Per-file failures are logged and counted; only run-level
/// problems (missing root) abort.
pub fn optimize_directory(root: &Path, options: &OptimizeOptions) -> Result<RunSummary> {
    if !root.is_dir() {
        return Err(OptimizeError::DirectoryNotFound(root.to_path_buf()));
    }

    info!("\nOptimizing images in: {}", root.display());
    info!(
        "Quality: {}, Max Width: {}px",
        options.quality, options.max_width
    );
    info!("{}", "-".repeat(60));

    let image_files = collect_image_files(root);

    if image_files.is_empty() {
        info!("No image files found under {}", root.display());
        return Ok(RunSummary::default());
    }

    verbose!(
        "Found {} image files to process under {}",
        image_files.len(),
        root.display()
    );

    let progress = if crate::logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(image_files.len() as u64)
    };
    progress.set_style(ProgressStyle::default_bar());

    let mut summary = RunSummary::default();

    for input in &image_files {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());

        info!("Processing: {}", file_name);

        let original_size = match fs::metadata(input) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                error!("{}: {}", file_name, e);
                summary.failed += 1;
                progress.inc(1);
                continue;
            }
        };
        summary.total_original += original_size;

        match optimize_image(input, None, options) {
            Ok(report) => {
                summary.processed += 1;
                summary.total_optimized += report.optimized_size;

                verbose!("wrote {}", report.output_path.display());
                if let Some((old_w, old_h)) = report.resized_from {
                    let (new_w, new_h) = report.dimensions;
                    info!("  Resized from {}x{} to {}x{}", old_w, old_h, new_w, new_h);
                }
                info!(
                    "  Original: {}  Optimized: {}  Reduction: {:.1}%",
                    format_file_size(report.original_size),
                    format_file_size(report.optimized_size),
                    report.reduction_percent()
                );
                if report.optimized_size > report.original_size {
                    warn!(
                        "{}: size increased by {:.1}%",
                        file_name,
                        report.reduction_percent().abs()
                    );
                }
            }
            Err(e) => {
                error!("{}: {}", file_name, e);
                summary.failed += 1;
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();

    Ok(summary)
}

/// Prints the end-of-run totals.
pub fn print_summary(summary: &RunSummary) {
    const MIB: f64 = 1024.0 * 1024.0;

    info!("\n{}", "=".repeat(60));
    info!("OPTIMIZATION SUMMARY");
    info!("{}", "=".repeat(60));
    info!("Images processed: {}", summary.processed);
    if summary.failed > 0 {
        info!("Images skipped (errors): {}", summary.failed);
    }
    info!(
        "Total original size: {:.2} MB",
        summary.total_original as f64 / MIB
    );
    info!(
        "Total optimized size: {:.2} MB",
        summary.total_optimized as f64 / MIB
    );

    if summary.total_original > 0 {
        info!("Total reduction: {:.1}%", summary.reduction_percent());
        info!(
            "Space saved: {:.2} MB",
            summary.bytes_saved() as f64 / MIB
        );
    }
}
