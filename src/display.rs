//! Diagnostic output shared by the library and the `zstdr` binary.
//!
//! A single process-wide notification level decides which messages reach
//! stderr.  The scale is the usual one for compression tools:
//!
//! | level | meaning                              |
//! |-------|--------------------------------------|
//! | 0     | silent                               |
//! | 1     | errors only                          |
//! | 2     | warnings and results (default)       |
//! | 3     | progress                             |
//! | 4+    | verbose / per-call tracing           |
//!
//! Library code only ever emits at level 2 or above, so embedding
//! applications can silence it with `set_display_level(1)`.

use std::sync::atomic::{AtomicI32, Ordering};

/// Default notification level: warnings and results.
pub const DISPLAY_LEVEL_DEFAULT: i32 = 2;

/// Process-wide notification level.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(DISPLAY_LEVEL_DEFAULT);

/// Returns the current notification level.
#[inline]
pub fn display_level() -> i32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the notification level.
#[inline]
pub fn set_display_level(level: i32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Increase verbosity by one step (`-v`).
#[inline]
pub fn increase_display_level() {
    DISPLAY_LEVEL.fetch_add(1, Ordering::Relaxed);
}

/// Decrease verbosity by one step (`-q`), never below 0.
#[inline]
pub fn decrease_display_level() {
    let _ = DISPLAY_LEVEL.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |l| {
        Some((l - 1).max(0))
    });
}

/// Print to stdout unconditionally.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr unconditionally.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the notification level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::display::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
