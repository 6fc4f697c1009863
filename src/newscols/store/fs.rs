use super::DocumentStore;
use crate::error::{NewscolsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore {
    root: PathBuf,
    file_ext: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: ".html".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    fn bare_name<'a>(&self, name: &'a str) -> &'a str {
        name.strip_suffix(self.file_ext.as_str()).unwrap_or(name)
    }

    /// Path of the document called `name` inside the root. Names must be a
    /// single plain file name; anything that could leave the root is refused.
    pub fn document_path(&self, name: &str) -> Result<PathBuf> {
        let bare = self.bare_name(name);
        if bare.is_empty() {
            return Err(NewscolsError::Store("document name is empty".to_string()));
        }
        if bare.contains(['/', '\\']) || bare == "." || bare == ".." {
            return Err(NewscolsError::Store(format!(
                "document name {:?} must not contain a path",
                name
            )));
        }
        Ok(self.root.join(format!("{}{}", bare, self.file_ext)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NewscolsError::Io)?;
        }
        Ok(())
    }
}

impl DocumentStore for FileStore {
    fn read(&self, name: &str) -> Result<String> {
        let path = self.document_path(name)?;
        if !path.exists() {
            return Err(NewscolsError::DocumentNotFound(self.bare_name(name).to_string()));
        }
        fs::read_to_string(path).map_err(NewscolsError::Io)
    }

    fn write(&mut self, name: &str, markup: &str) -> Result<()> {
        let path = self.document_path(name)?;
        self.ensure_dir()?;
        fs::write(&path, markup).map_err(NewscolsError::Io)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(NewscolsError::Io)? {
            let path = entry.map_err(NewscolsError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(self.file_ext.as_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn exists(&self, name: &str) -> bool {
        self.document_path(name).is_ok_and(|path| path.exists())
    }
}
