//! Lexical path helpers. Nothing here touches the file system.

use std::path::{Component, Path, PathBuf};

/// Shortest lexically equivalent path: drops `.` and empty elements and
/// folds `name/..` pairs. `..` directly under the root is dropped.
pub fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.into_iter().collect()
}

/// Directory part of a path, cleaned; `.` when the path has no directory part
pub fn dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) => clean(parent),
        None if path.has_root() => clean(path),
        None => PathBuf::from("."),
    }
}

/// Walk `levels` directories up
pub fn ancestor(path: &Path, levels: usize) -> PathBuf {
    (0..levels).fold(path.to_path_buf(), |current, _| dir(&current))
}

/// Last element of a path
pub fn base(path: &Path) -> String {
    match path.components().next_back() {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        Some(Component::ParentDir) => "..".to_string(),
        Some(Component::RootDir) => "/".to_string(),
        Some(Component::Prefix(prefix)) => prefix.as_os_str().to_string_lossy().into_owned(),
        Some(Component::CurDir) | None => ".".to_string(),
    }
}

/// Join and clean, so `.` as base leaves no leading `./`
pub fn join(base: &Path, relative: impl AsRef<Path>) -> PathBuf {
    clean(&base.join(relative))
}
