// src/output.rs
use crate::error::{PathContext, Result};
use crate::types::{Category, SearchItem};
use crate::utils::extract_subdomain;
use log::error;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends search results to `<dir>/<prefix>-<category>.txt`.
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, prefix: &str, category: Category) -> PathBuf {
        self.dir.join(format!("{}-{}.txt", prefix, category))
    }

    /// Raw mode: title line, URL line, blank line per item.
    pub fn write_items(&self, path: &Path, items: &[SearchItem]) -> Result<usize> {
        let mut writer = BufWriter::new(self.open_append(path)?);
        for item in items {
            write!(writer, "{}\n{}\n\n", item.title, item.url).output_at("Failed to write", path)?;
        }
        writer.flush().output_at("Failed to write", path)?;
        Ok(items.len())
    }

    /// Subdomain mode: one unique host per line. URLs without a host of at
    /// least three labels are logged and skipped.
    pub fn write_subdomains(&self, path: &Path, items: &[SearchItem]) -> Result<usize> {
        let mut subdomains = HashSet::new();
        for item in items {
            match extract_subdomain(&item.url) {
                Some(subdomain) => {
                    subdomains.insert(subdomain);
                }
                None => error!("No subdomain found in {}", item.url),
            }
        }

        let mut writer = BufWriter::new(self.open_append(path)?);
        for subdomain in &subdomains {
            writeln!(writer, "{}", subdomain).output_at("Failed to write", path)?;
        }
        writer.flush().output_at("Failed to write", path)?;
        Ok(subdomains.len())
    }

    fn open_append(&self, path: &Path) -> Result<File> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).output_at("Failed to create directory", parent)?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .output_at("Failed to open", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read_blocks(path: &Path) -> Vec<SearchItem> {
        fs::read_to_string(path)
            .unwrap()
            .split("\n\n")
            .filter(|block| !block.is_empty())
            .map(|block| {
                let (title, url) = block.split_once('\n').unwrap();
                SearchItem::new(title, url)
            })
            .collect()
    }

    #[test]
    fn test_path_for() {
        let writer = OutputWriter::new("output");
        assert_eq!(
            writer.path_for("g", Category::Sensitive),
            PathBuf::from("output/g-sensitive.txt")
        );
    }

    #[test]
    fn test_raw_items_read_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("nested"));
        let path = writer.path_for("b", Category::Document);
        let items = vec![
            SearchItem::new("Readme", "https://www.example.com/readme.txt"),
            SearchItem::new("", "https://www.example.com/untitled"),
            SearchItem::new("Setup guide", "https://docs.example.com/setup.txt"),
        ];

        assert_eq!(writer.write_items(&path, &items).unwrap(), 3);
        assert_eq!(read_blocks(&path), items);
    }

    #[test]
    fn test_raw_items_append_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        let path = writer.path_for("g", Category::Install);

        writer.write_items(&path, &[SearchItem::new("first", "https://a.example.com/")]).unwrap();
        writer.write_items(&path, &[SearchItem::new("second", "https://b.example.com/")]).unwrap();

        let titles: Vec<String> = read_blocks(&path).into_iter().map(|item| item.title).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_subdomains_deduplicated_and_malformed_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        let path = writer.path_for("g", Category::Subdomain);
        let items = vec![
            SearchItem::new("x", "https://a.b.example.com/x"),
            SearchItem::new("y", "https://a.b.example.com/y"),
            SearchItem::new("bad", "http://bad"),
        ];

        assert_eq!(writer.write_subdomains(&path, &items).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a.b.example.com\n");
    }

    #[test]
    fn test_subdomains_multiple_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        let path = writer.path_for("b", Category::Subdomain);
        let items = vec![
            SearchItem::new("", "https://www.example.com/"),
            SearchItem::new("", "https://mail.example.com/login"),
            SearchItem::new("", "https://www.example.com/about"),
        ];

        writer.write_subdomains(&path, &items).unwrap();

        let mut lines: Vec<String> = fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        assert_eq!(lines, vec!["mail.example.com", "www.example.com"]);
    }

    #[test]
    fn test_unwritable_directory_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, "").unwrap();
        let writer = OutputWriter::new(&blocker);
        let path = writer.path_for("g", Category::Install);

        let err = writer.write_items(&path, &[]).unwrap_err();
        assert!(matches!(err, crate::types::SitedorkError::OutputError(_)));
    }

    #[test]
    fn test_empty_batch_still_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        let path = writer.path_for("g", Category::Redirect);

        assert_eq!(writer.write_items(&path, &[]).unwrap(), 0);
        assert!(path.exists());
    }
}
