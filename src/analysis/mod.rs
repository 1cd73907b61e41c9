pub mod assignments;
pub mod diff;
pub mod document;
pub mod module_resolver;
pub mod query;
pub mod resolver;
pub mod stylesheet;
pub mod syntax;

pub use assignments::extract_assignments;
pub use diff::{all_missing_identifiers, completion_candidates, missing_identifiers, unused_identifiers};
pub use document::DocumentManager;
pub use query::QueryEngine;
pub use resolver::{DiskReader, FileReader, FsStylesheetResolver, StyleError, StylesheetResolver};
pub use stylesheet::ClassNameTransform;
pub use syntax::{ParsedSource, SourceFile};
