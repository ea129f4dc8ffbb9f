// src/download.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::util::string::StringUtils;

/// `<topic title>.md`
pub fn note_file_name(topic_title: &str) -> String {
    format!("{}.md", StringUtils::sanitize_file_name(topic_title))
}

/// `analysis_<source file>.md`, or `analysis_code.md` when the source is unknown.
pub fn analysis_file_name(source_file: Option<&str>) -> String {
    let source = source_file.filter(|s| !s.is_empty()).unwrap_or("code");
    format!("analysis_{}.md", StringUtils::sanitize_file_name(source))
}

/// Writes `content` byte for byte and returns the written path.
pub fn save_document(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, content)?;
    Ok(path)
}
