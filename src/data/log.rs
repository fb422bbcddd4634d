use std::sync::atomic::{AtomicBool, Ordering::Relaxed};

static LOG_ENABLED: AtomicBool = AtomicBool::new(true);

pub fn set_log_enabled(enabled: bool) {
    LOG_ENABLED.store(enabled, Relaxed);
}

pub fn log_enabled() -> bool {
    LOG_ENABLED.load(Relaxed)
}

/// Plain informational output. Silenced by `--quiet`.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if $crate::data::log::log_enabled() {
            println!($($arg)*);
        }
    };
}

/// Yellow warning on stderr. Silenced by `--quiet`.
#[macro_export]
macro_rules! alert {
    ($($arg:tt)*) => {
        if $crate::data::log::log_enabled() {
            eprintln!("\x1B[33;1m{}\x1B[0m", format!($($arg)*));
        }
    };
}

/// Red error on stderr. Never silenced.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("\x1B[31;1m{}\x1B[0m", format!($($arg)*))
    };
}
