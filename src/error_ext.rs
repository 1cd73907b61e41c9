//! Logging conversions for `Result`.
//!
//! Analysis never surfaces errors to the editor; failures degrade to empty
//! results. These helpers make sure the degradation still leaves a trace.

use tracing::{error, warn};

pub trait ResultExt<T, E: std::fmt::Display> {
    /// Convert to Option, logging the error at error level.
    fn ok_logged(self, context: &str) -> Option<T>;

    /// Convert to Option, logging the error at warn level.
    ///
    /// For failures that are part of normal editing, like a stylesheet
    /// that does not exist yet.
    fn ok_warn(self, context: &str) -> Option<T>;

    /// Like `ok_warn`, but falls back to `T::default()`.
    fn or_default_warn(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn ok_logged(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                error!(context = %context, error = %e, "Operation failed");
                None
            }
        }
    }

    fn ok_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(context = %context, error = %e, "Operation failed, continuing with fallback");
                None
            }
        }
    }

    fn or_default_warn(self, context: &str) -> T
    where
        T: Default,
    {
        self.ok_warn(context).unwrap_or_default()
    }
}
