pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod logger;
pub mod processing;
pub mod prompt;
pub mod utils;

pub use batch::{collect_image_files, optimize_directory, print_summary, RunSummary};
pub use error::{OptimizeError, Result};
pub use processing::{
    flatten_alpha, generate_output_path, optimize_image, resize_to_max_width, EncodeTarget,
    FileReport, OptimizeOptions,
};
pub use utils::{calculate_reduction, format_file_size, is_image_file};
