use crate::error::{Error, Result};
use std::path::{Component, Path};

/// Normalize a user-supplied name relative to the library root
///
/// Rejects empty names, absolute paths and parent directory traversal so a
/// name can never resolve outside the library. Returns the components joined
/// with forward slashes.
pub fn sanitize_relative(raw_path: &str) -> Result<String> {
    if raw_path.trim().is_empty() {
        return Err(Error::InvalidPath("Empty path".to_string()));
    }

    let mut components = Vec::new();

    for component in Path::new(raw_path).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(Error::InvalidPath(format!(
                    "Absolute path not allowed: {}",
                    raw_path
                )));
            }
            Component::ParentDir => {
                return Err(Error::InvalidPath(format!(
                    "Parent directory traversal not allowed: {}",
                    raw_path
                )));
            }
            Component::CurDir => continue,
            Component::Normal(part) => {
                let part_str = part.to_str().ok_or_else(|| {
                    Error::InvalidPath(format!("Invalid UTF-8 in path: {:?}", part))
                })?;
                components.push(part_str);
            }
        }
    }

    if components.is_empty() {
        return Err(Error::InvalidPath(format!(
            "No valid components: {}",
            raw_path
        )));
    }

    Ok(components.join("/"))
}

/// Forward-slash form of a path relative to `root`, used as a tree node id
pub fn relative_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
