use crate::config;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Uploads root (absolute), from `config::uploads_root()`.
/// If relative in env, resolve against current_dir().
pub fn uploads_root() -> PathBuf {
    let p = PathBuf::from(config::uploads_root());
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Resolve an uploaded file name under `root`.
///
/// Only a single plain file name is accepted; anything with separators,
/// `..` or a root component yields `None`.
pub fn upload_path(root: &Path, filename: &str) -> Option<PathBuf> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(root.join(name)),
        _ => None,
    }
}
