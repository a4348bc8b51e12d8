use log::{debug, error, info, warn};
use std::sync::Once;
use std::time::Instant;

static INIT: Once = Once::new();

/// Installs `env_logger` for `log` records and a `tracing` subscriber for
/// the HTTP and cache layers. Safe to call more than once.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .filter_module("shikaraka_lib", log::LevelFilter::Debug)
            .filter_module("diesel", log::LevelFilter::Warn)
            .filter_module("reqwest", log::LevelFilter::Warn)
            .filter_module("tokio", log::LevelFilter::Warn)
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .try_init();

        // HTTP client and cache internals emit `tracing` events
        let _ = tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(tracing::Level::INFO)
            .try_init();

        info!("Logging initialized");
    });
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// One-line structured events shared by every module
pub struct LogContext;

impl LogContext {
    /// `duration_ms` is `None` when the query is about to start
    pub fn db_operation(operation: &str, table: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(ms) => debug!("DB: {} {} took {}ms", operation, table, ms),
            None => debug!("DB: {} {}", operation, table),
        }
    }

    /// Outbound call to Supabase or Shikimori
    pub fn api_call(service: &str, endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(ms) => info!("API: {} {} -> {} in {}ms", service, endpoint, status, ms),
            None => debug!("API: {} {} -> {}", service, endpoint, status),
        }
    }

    pub fn search_operation(query: &str, results: Option<usize>) {
        match results {
            Some(count) => info!("Search: '{}' returned {} titles", query, count),
            None => debug!("Search: '{}' started", query),
        }
    }

    /// Limiter rejections and similar abuse signals; never fails the caller
    pub fn suspicious_activity(user_id: &str, action: &str, details: &str) {
        warn!("Suspicious activity: user={} action={} {}", user_id, action, details);
    }

    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    pub fn performance_metric(operation: &str, duration_ms: u64, details: Option<&str>) {
        match details {
            Some(details) => info!("Timing: {} took {}ms ({})", operation, duration_ms, details),
            None => info!("Timing: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Logs the elapsed time of an operation when finished
pub struct TimedOperation {
    start: Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Started: {}", operation);
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) -> u64 {
        let elapsed = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, elapsed, None);
        elapsed
    }

    pub fn finish_with_info(self, details: &str) -> u64 {
        let elapsed = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, elapsed, Some(details));
        elapsed
    }
}
