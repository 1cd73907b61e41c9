//! Resolution of style import specifiers to file paths.
//!
//! Only relative specifiers (`./card.module.css`, `../shared/a.module.scss`)
//! are resolved. Package imports, absolute paths and bundler aliases are left
//! alone; their stylesheets count as having no classes.

use std::path::{Component, Path, PathBuf};

/// Resolve `specifier` against the directory of `from_file`.
///
/// The result is normalized lexically and is not checked for existence;
/// reading it is the caller's concern.
pub fn resolve_specifier(specifier: &str, from_file: &Path) -> Option<PathBuf> {
    if !is_relative_import(specifier) {
        return None;
    }

    // Query strings and fragments (`./a.module.css?inline`) are bundler hints.
    let specifier = specifier
        .split(['?', '#'])
        .next()
        .unwrap_or(specifier);

    let from_dir = from_file.parent()?;
    Some(normalize_path(&from_dir.join(specifier)))
}

/// `true` for specifiers starting with "./" or "../".
#[inline]
pub fn is_relative_import(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

/// Resolve `.` and `..` components without touching the file system.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            Component::CurDir => {}
            _ => components.push(component),
        }
    }

    components.iter().collect()
}
