//! This module provides observability and diagnostics hooks for the offline
//! network search. The `log_metric!` macro is the primary tool.
//!
//! It is a zero-cost abstraction: the `#[cfg(debug_assertions)]` attribute
//! ensures that the macro body is completely compiled out of release builds,
//! imposing no performance penalty on the codec hot path.

/// Logs a structured key-value metric string to stdout, only in debug builds.
///
/// # Example
/// ```
/// use byteplane::log_metric;
/// let count = 4;
/// log_metric!("event"="network_search", "min_len"=&6, "count"=&count);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            let output = format!("BYTEPLANE_METRIC: {{ {} }}", parts.join(", "));
            println!("{}", output);
        }
    };
}
