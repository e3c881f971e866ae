//! Logging macros.
//!
//! All of them capture the call site so lines carry `Class#method`.
//!
//! ```
//! use fanlog::{info, LoggerFactory};
//!
//! let factory = LoggerFactory::new();
//! let logger = factory.get_logger("app.http.Server");
//! info!(logger, "Serving Http on {} port {}", "0.0.0.0", 8080);
//! ```

/// Captures the [`CallSite`](crate::caller::CallSite) of the invoking scope.
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __fanlog_marker() {}
        $crate::caller::CallSite::new(
            $crate::caller::type_name_of(__fanlog_marker),
            file!(),
            line!(),
        )
    }};
}

/// Logs a placeholder template at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_at(
            &$crate::call_site!(),
            $level,
            $template,
            &[$($crate::format::arg(&$arg)),*],
        )
    };
}

/// Logs a verbatim message with an error cause.
///
/// `$cause` is any `Error + 'static` value; it is borrowed, not moved.
#[macro_export]
macro_rules! log_cause {
    ($logger:expr, $level:expr, $message:expr, $cause:expr $(,)?) => {
        $logger.log_cause_at(
            &$crate::call_site!(),
            $level,
            $message,
            Some(&$cause as $crate::adapter::Cause<'_>),
        )
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::TRACE, $($rest)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($rest)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($rest)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($rest)+)
    };
}
