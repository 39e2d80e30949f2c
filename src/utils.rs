use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{HuffError, Result};

pub const TREE_EXT: &str = "tree";
pub const TEMP_EXT: &str = "tmp"; // For atomic writes

/// Read an entire source file, reporting failures as unavailable input.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| HuffError::input(path, e))
}

/// A file written under a unique temp name, waiting to be renamed into place.
/// Dropping it without committing removes the temp file.
#[derive(Debug)]
pub struct StagedFile {
    temp: PathBuf,
    dest: PathBuf,
}

impl StagedFile {
    /// Writes `data` next to `dest`. The temp file is created with
    /// `create_new`, so an existing file (the source included) is never
    /// overwritten.
    pub fn write(dest: &Path, data: &[u8]) -> Result<Self> {
        loop {
            let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
            let suffix = format!("{}-{}.{}", std::process::id(), n, TEMP_EXT);
            let temp = with_suffix(dest, &suffix);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&temp) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            let staged = StagedFile {
                temp,
                dest: dest.to_path_buf(),
            };
            file.write_all(data)?;
            file.sync_all()?;
            return Ok(staged);
        }
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp
    }

    fn commit(&mut self) -> io::Result<()> {
        fs::rename(&self.temp, &self.dest)?;
        self.temp = PathBuf::new();
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.temp.as_os_str().is_empty() {
            let _ = fs::remove_file(&self.temp);
        }
    }
}

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write `data` to a temp file, then rename it over `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    write_all_atomic(&[(path, data)])
}

/// Writes every file or none of them: all contents are staged first, then
/// renamed in order. If a rename fails, files already renamed by this call
/// are removed and the remaining temp files are dropped.
pub fn write_all_atomic(files: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged = files
        .iter()
        .map(|&(path, data)| StagedFile::write(path, data))
        .collect::<Result<Vec<_>>>()?;

    for i in 0..staged.len() {
        if let Err(e) = staged[i].commit() {
            for done in &staged[..i] {
                let _ = fs::remove_file(&done.dest);
            }
            return Err(e.into());
        }
    }
    Ok(())
}

/// Default tree artifact location for a payload: `out.huff` -> `out.huff.tree`.
pub fn tree_path_for(payload: &Path) -> PathBuf {
    with_suffix(payload, TREE_EXT)
}

fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Format bytes into human-readable string (e.g. 1024 -> "1.00 KB")
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// Output size as a percentage of input size; 0 for empty input.
pub fn compression_ratio(input: u64, output: u64) -> f64 {
    if input == 0 {
        0.0
    } else {
        output as f64 / input as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_path_appends_suffix() {
        assert_eq!(tree_path_for(Path::new("out.huff")), PathBuf::from("out.huff.tree"));
        assert_eq!(tree_path_for(Path::new("dir/out")), PathBuf::from("dir/out.tree"));
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn ratio_handles_empty_input() {
        assert_eq!(compression_ratio(0, 1), 0.0);
        assert_eq!(compression_ratio(200, 50), 25.0);
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("hufpack-utils-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn staged_file_never_overwrites_existing_files() {
        let dir = scratch_dir("staged");
        let dest = dir.join("out");
        let staged = StagedFile::write(&dest, b"new").unwrap();
        let first = staged.temp_path().to_path_buf();
        assert!(first.starts_with(&dir));
        assert_eq!(fs::read(&first).unwrap(), b"new");

        let second = StagedFile::write(&dest, b"other").unwrap();
        assert_ne!(second.temp_path(), first.as_path());
        assert_eq!(fs::read(&first).unwrap(), b"new");

        drop(staged);
        drop(second);
        assert!(!first.exists());
        assert!(!dest.exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_rename_rolls_back_whole_group() {
        let dir = scratch_dir("group");
        let tree = dir.join("out.tree");
        let blocked = dir.join("out");
        fs::create_dir(&blocked).unwrap();

        let files: [(&Path, &[u8]); 2] = [(&tree, b"1z"), (&blocked, &[4, 0])];
        assert!(write_all_atomic(&files).is_err());

        let mut left: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        left.sort();
        assert_eq!(left, vec![OsString::from("out")]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_input_is_reported_with_path() {
        let path = Path::new("definitely/not/here.bin");
        match read_input(path) {
            Err(HuffError::InputUnavailable { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
