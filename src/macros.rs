// Conditional tracing support.
//
// Both macros compile to nothing when the `tracing` feature is disabled.

/// Enter a tracing span for a processing stage (when the `tracing` feature
/// is enabled). The span lasts until the end of the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("textviz_stage", stage = $name).entered();
    };
}

/// Emit a `debug!` event with structured fields (when the `tracing` feature
/// is enabled).
macro_rules! trace_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)+);
    };
}
