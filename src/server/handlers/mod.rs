mod completion;
mod diagnostics;
pub(crate) mod util;

pub use completion::{handle_completion, merge_completion_items};
pub use diagnostics::{compute_diagnostics, merge_diagnostics};
