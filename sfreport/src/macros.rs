/// Emit a progress event at `INFO` when `$verbose` is set, `DEBUG` otherwise.
///
/// Expands to nothing without the `tracing` feature.
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            if $verbose {
                tracing::info!(target: "sfreport::report", $($arg)+);
            } else {
                tracing::debug!(target: "sfreport::report", $($arg)+);
            }
        }
    };
}
