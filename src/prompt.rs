/// Interactive stdin prompts for the run configuration.
///
/// Parsing is separated from terminal I/O so the fallback and clamping
/// rules are unit-testable.
use crate::constants::{DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
use std::io::{self, BufRead, Write};

/// Parse a quality answer. Blank or non-numeric input falls back to the
/// default; numeric input is clamped into 1-100, including integers too
/// large to represent.
pub fn parse_quality(input: &str) -> u8 {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(q) => q.clamp(MIN_QUALITY as i64, MAX_QUALITY as i64) as u8,
        Err(_) if is_integer_literal(trimmed) => {
            if trimmed.starts_with('-') {
                MIN_QUALITY
            } else {
                MAX_QUALITY
            }
        }
        Err(_) => DEFAULT_QUALITY,
    }
}

/// Parse a max-width answer. Blank, non-numeric, or non-positive input
/// falls back to the default; oversized integers clamp to the widest
/// representable width.
pub fn parse_max_width(input: &str) -> u32 {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(w) if w > 0 => w.min(u32::MAX as i64) as u32,
        Err(_) if is_integer_literal(trimmed) && !trimmed.starts_with('-') => u32::MAX,
        _ => DEFAULT_MAX_WIDTH,
    }
}

/// True for an optionally signed run of ASCII digits, i.e. an answer that
/// is numeric even when it overflows the parse above.
fn is_integer_literal(s: &str) -> bool {
    let digits = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('+'))
        .unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Only "yes" and "y" (any casing) count as consent.
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "yes" | "y")
}

pub fn confirm(message: &str) -> io::Result<bool> {
    Ok(is_affirmative(&ask(message)?))
}

pub fn read_quality() -> io::Result<u8> {
    let answer = ask(&format!(
        "\nEnter JPEG quality (1-100, recommended {}): ",
        DEFAULT_QUALITY
    ))?;
    Ok(parse_quality(&answer))
}

pub fn read_max_width() -> io::Result<u32> {
    let answer = ask(&format!(
        "Enter maximum width in pixels (recommended {}): ",
        DEFAULT_MAX_WIDTH
    ))?;
    Ok(parse_max_width(&answer))
}

fn ask(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quality_blank_uses_default() {
        assert_eq!(parse_quality(""), 85);
        assert_eq!(parse_quality("   \n"), 85);
    }

    #[test]
    fn test_parse_quality_non_numeric_uses_default() {
        assert_eq!(parse_quality("high"), 85);
        assert_eq!(parse_quality("8o"), 85);
    }

    #[test]
    fn test_parse_quality_clamps_out_of_range() {
        assert_eq!(parse_quality("0"), 1);
        assert_eq!(parse_quality("-5"), 1);
        assert_eq!(parse_quality("150"), 100);
        assert_eq!(parse_quality("999999999999"), 100);
    }

    #[test]
    fn test_parse_quality_clamps_overflowing_integers() {
        // Wider than i64, still a number: clamp to the boundary, not the default.
        assert_eq!(parse_quality("99999999999999999999999999"), 100);
        assert_eq!(parse_quality("-99999999999999999999999999"), 1);
        assert_eq!(parse_quality("+99999999999999999999999999"), 100);
    }

    #[test]
    fn test_parse_max_width_clamps_overflowing_integers() {
        assert_eq!(parse_max_width("99999999999999999999999999"), u32::MAX);
        assert_eq!(parse_max_width("-99999999999999999999999999"), 1920);
    }

    #[test]
    fn test_parse_quality_in_range() {
        assert_eq!(parse_quality("1"), 1);
        assert_eq!(parse_quality(" 85 "), 85);
        assert_eq!(parse_quality("100"), 100);
    }

    #[test]
    fn test_parse_max_width_fallbacks() {
        assert_eq!(parse_max_width(""), 1920);
        assert_eq!(parse_max_width("wide"), 1920);
        assert_eq!(parse_max_width("0"), 1920);
        assert_eq!(parse_max_width("-100"), 1920);
    }

    #[test]
    fn test_parse_max_width_valid() {
        assert_eq!(parse_max_width("800"), 800);
        assert_eq!(parse_max_width(" 2560\n"), 2560);
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES \n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yeah"));
        assert!(!is_affirmative(""));
    }
}
