use anyhow::{Result, Context};
use log::warn;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::HookError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: `<output_dir>/<input stem>.<extension>`
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(extension.trim_start_matches('.'));

        output_dir.as_ref().join(output_filename)
    }

    /// Strip trailing language suffixes (`Title.en` -> `Title`) from a file stem
    pub fn title_from_stem<S: AsRef<str>>(stem: &str, language_suffixes: &[S]) -> String {
        let mut title = stem;
        for suffix in language_suffixes {
            let dotted = format!(".{}", suffix.as_ref());
            if let Some(stripped) = title.strip_suffix(dotted.as_str()) {
                title = stripped;
                break;
            }
        }
        title.to_string()
    }

    fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| {
                extensions
                    .iter()
                    .any(|wanted| ext.eq_ignore_ascii_case(wanted.as_ref().trim_start_matches('.')))
            })
    }

    /// Find files with any of the given extensions, recursively, in path order.
    /// Entries that cannot be read (dangling links, loops, denied folders) are
    /// logged and skipped.
    pub fn find_files<P: AsRef<Path>, S: AsRef<str>>(dir: P, extensions: &[S]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_file() && Self::has_extension(path, extensions) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// List files with the given extension directly inside `dir`
    pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && Self::has_extension(entry.path(), &[extension]) {
                result.push(entry.into_path());
            }
        }

        Ok(result)
    }

    /// Read a file as UTF-8 text
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, HookError> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::InvalidData => HookError::Encoding(path.to_path_buf()),
            _ => HookError::Read { path: path.to_path_buf(), source },
        })
    }

    /// Write a string to a file, creating parent directories
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), HookError> {
        let path = path.as_ref();
        let to_write_error = |source: std::io::Error| HookError::Write { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(to_write_error)?;
        }

        fs::write(path, content).map_err(to_write_error)
    }
}
