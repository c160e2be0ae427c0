//! Scanner tracing.
//!
//! With the `trace` feature enabled, `trace!` forwards to `tracing::trace!`
//! under the `templex::scanner` target. Without it the macro expands to
//! nothing and its arguments are not evaluated.

#[cfg(feature = "trace")]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "templex::scanner", $($arg)*)
    };
}

#[cfg(not(feature = "trace"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}
