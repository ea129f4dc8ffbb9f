// src/upload.rs
//! File input boundary. The extension check is the only input-shape
//! validation in the app and always runs before the file is read.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ALLOWED_EXTENSIONS: &[&str] = &[".py", ".txt"];

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("请上传 Python (.py) 或 文本 (.txt) 文件。")]
    UnsupportedExtension { file_name: String },

    #[error("读取文件失败。")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub contents: String,
}

/// Case-sensitive suffix match, so `MODEL.PY` is rejected.
pub fn validate_file_name(file_name: &str) -> Result<(), UploadError> {
    if ALLOWED_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext)) {
        Ok(())
    } else {
        Err(UploadError::UnsupportedExtension {
            file_name: file_name.to_string(),
        })
    }
}

/// Normalizes what the user typed or pasted into the path box. Terminals
/// often wrap dropped paths in quotes.
pub fn parse_path_input(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Validates, then reads the whole file as text. Invalid UTF-8 sequences
/// become U+FFFD; only I/O failures are errors.
pub fn read_upload(path: &Path) -> Result<UploadedFile, UploadError> {
    let file_name = file_name_of(path);
    validate_file_name(&file_name)?;

    let bytes = fs::read(path).map_err(|source| UploadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let contents = String::from_utf8_lossy(&bytes).into_owned();

    Ok(UploadedFile { file_name, contents })
}
