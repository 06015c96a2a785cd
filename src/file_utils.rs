use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// UTF-8 byte-order mark some subtitle tools prepend to SRT files
const UTF8_BOM: char = '\u{feff}';

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a subtitle file to a string, stripping an optional UTF-8 BOM
    pub fn read_subtitle_file<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        Ok(content.strip_prefix(UTF8_BOM).unwrap_or(&content).to_string())
    }

    /// Write translated subtitle content, creating parent directories as needed
    pub fn write_subtitle_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))
    }

    // @generates: Output path for translated subtitle
    // @params: input_file, output_dir, target_language
    pub fn output_path_for<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(target_language);
        output_filename.push_str(".srt");

        output_dir.as_ref().join(output_filename)
    }

    /// Whether the file name already carries a language suffix matching
    /// `language` (e.g. `movie.fr.srt` for target "fr" or "fra")
    pub fn is_translated_for<P: AsRef<Path>>(path: P, language: &str) -> bool {
        let Some(stem) = path.as_ref().file_stem().map(|s| s.to_string_lossy()) else {
            return false;
        };
        match stem.rsplit('.').next() {
            Some(suffix) if suffix != stem => {
                crate::language_utils::language_codes_match(suffix, language)
            }
            _ => false,
        }
    }

    /// Find all .srt files beneath a directory
    pub fn find_srt_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"))
            {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }
}
