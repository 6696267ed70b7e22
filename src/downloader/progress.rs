//! Single-line textual download progress.

use std::io::{self, Write};

/// Render the download progress bar: `[####-----] 50%`.
///
/// The bar draws `barsize - 1` cells. The fraction is taken as-is: values
/// above 1 overfill the percentage and a NaN fraction (no content length on
/// the response) renders as an all-dash bar with a literal `NaN%`.
pub fn progress_bar(barsize: usize, fraction: f64) -> String {
    let cells = barsize.saturating_sub(1);
    let filled = (cells as f64 * fraction).floor();

    let mut bar = String::with_capacity(cells);
    for i in 1..=cells {
        if (i as f64) <= filled {
            bar.push('#');
        } else {
            bar.push('-');
        }
    }

    format!("[{bar}] {}%", (fraction * 100.0).floor())
}

/// Rewrite the current terminal line in place.
pub fn override_line(text: &str) {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "\r\x1b[2K{text}");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bar_at_zero() {
        assert_eq!(progress_bar(10, 0.0), "[---------] 0%");
    }

    #[test]
    fn full_bar_at_one() {
        assert_eq!(progress_bar(10, 1.0), "[#########] 100%");
    }

    #[test]
    fn half_bar() {
        assert_eq!(progress_bar(10, 0.5), "[####-----] 50%");
    }

    #[test]
    fn nan_fraction_stays_visible() {
        assert_eq!(progress_bar(10, f64::NAN), "[---------] NaN%");
    }

    #[test]
    fn fraction_is_not_clamped() {
        assert_eq!(progress_bar(10, 1.5), "[#########] 150%");
    }
}
