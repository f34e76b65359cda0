use std::sync::atomic::{AtomicBool, Ordering};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_quiet_mode(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose_mode(verbose: bool) {
    VERBOSE_MODE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::Relaxed)
}

/// Normal run output. Suppressed by --quiet.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            println!($($arg)*);
        }
    };
}

/// Extra diagnostics, shown only with --verbose.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose() && !$crate::logger::is_quiet() {
            println!("[verbose] {}", format!($($arg)*));
        }
    };
}

/// Per-file and run-level failures. Always printed.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("Error: {}", format!($($arg)*));
    };
}

/// Non-fatal oddities (skipped entries, files that grew). Suppressed by --quiet.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            eprintln!("Warning: {}", format!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags_round_trip() {
        set_quiet_mode(true);
        assert!(is_quiet());
        set_quiet_mode(false);
        assert!(!is_quiet());

        set_verbose_mode(true);
        assert!(is_verbose());
        set_verbose_mode(false);
        assert!(!is_verbose());
    }
}
