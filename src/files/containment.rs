use std::io;
use std::path::{Path, PathBuf};

/// Resolves a path to its canonical absolute form, following symlinks.
///
/// Relative paths resolve against the current working directory. The path
/// must exist; resolution of a nonexistent path is an error, which
/// [`is_contained`] treats as a rejection.
pub fn canonicalized(path: &Path) -> io::Result<PathBuf> {
    dunce::canonicalize(path)
}

/// Whether `candidate` lives inside `base` after both resolve to canonical
/// form.
///
/// Fails closed: if either path cannot be canonicalized the answer is
/// `false`. The check is component-wise, so a sibling whose name merely
/// starts with the base's name (`/p/project-evil` against `/p/project`)
/// is not contained. A path is contained in itself.
pub fn is_contained(base: &Path, candidate: &Path) -> bool {
    match (canonicalized(base), canonicalized(candidate)) {
        (Ok(base), Ok(candidate)) => candidate.starts_with(&base),
        _ => false,
    }
}
