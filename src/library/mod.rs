mod path;
mod tree;


pub use path::sanitize_relative;
pub use tree::{build_tree, split_parent_name, split_sort_key, TreeNode, SPLIT_TAG};

use crate::error::{Error, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Check if a path names a PDF by extension
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Working directory holding imported PDFs and their split outputs
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Open a library, creating its directory if missing
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `path` already lives inside the library
    pub fn contains(&self, path: &Path) -> bool {
        match (fs::canonicalize(&self.root), fs::canonicalize(path)) {
            (Ok(root), Ok(path)) => path.starts_with(root),
            _ => false,
        }
    }

    /// Resolve a name relative to the library root, refusing to leave it
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = sanitize_relative(name)?;
        Ok(self.root.join(relative))
    }

    /// First free `NNN_name` for an imported file, counting from 001
    pub fn next_filename(&self, name: &str) -> String {
        let mut counter = 1u32;
        loop {
            let candidate = format!("{:03}_{}", counter, name);
            if !self.root.join(&candidate).exists() {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Copy a PDF into the library under a numbered name
    ///
    /// Files already inside the library are returned unchanged.
    pub fn import(&self, source: &Path) -> Result<PathBuf> {
        if !source.is_file() {
            return Err(Error::NotFound(source.to_path_buf()));
        }
        if self.contains(source) {
            return Ok(source.to_path_buf());
        }

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;
        let target = self.root.join(self.next_filename(&name));

        fs::copy(source, &target)?;
        info!("Imported {} as {}", source.display(), target.display());
        Ok(target)
    }

    /// Every PDF below the root, sorted by path
    pub fn pdf_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && is_pdf(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Library listing with split outputs grouped under their parents
    pub fn tree(&self) -> Result<Vec<TreeNode>> {
        let files = self.pdf_files()?;
        Ok(build_tree(&self.root, &files))
    }

    /// A document and its split outputs, in section order
    pub fn family(&self, base: &Path) -> Result<Vec<PathBuf>> {
        let stem = base
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidPath(base.display().to_string()))?;
        let dir = match base.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => self.root.as_path(),
        };

        let prefix = format!("{}{}", stem, SPLIT_TAG);
        let mut members: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_pdf(path))
            .filter(|path| {
                path.file_stem()
                    .map(|n| {
                        let n = n.to_string_lossy();
                        n == stem.as_str() || n.starts_with(&prefix)
                    })
                    .unwrap_or(false)
            })
            .collect();

        members.sort_by_key(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (split_sort_key(&name), name)
        });

        Ok(members)
    }

    /// Remove a file from the library
    pub fn delete(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        if !self.contains(path) {
            return Err(Error::InvalidPath(format!(
                "{} is outside the library",
                path.display()
            )));
        }

        fs::remove_file(path)?;
        info!("Deleted {}", path.display());
        Ok(())
    }
}
