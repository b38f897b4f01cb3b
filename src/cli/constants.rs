// cli/constants.rs — Identity constants and display infrastructure.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity constants ────────────────────────────────────────────────────────
pub const PROGRAM_NAME: &str = "symdel";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal (warnings, results);
// 3 = progress; 4 = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed)
}

// ── Display helpers ───────────────────────────────────────────────────────────

/// Print to stdout regardless of display level.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr regardless of display level.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_name_constant() {
        assert_eq!(PROGRAM_NAME, "symdel");
    }

    #[test]
    fn display_level_round_trips() {
        // Other tests may mutate the global; restore it afterwards.
        let prev = display_level();
        set_display_level(4);
        assert_eq!(display_level(), 4);
        set_display_level(prev);
    }
}
