//! Zip archiving of the download tree.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::fs::ARCHIVE_FILENAME;

/// Write every file under `root` into `root/snap_media.zip`.
///
/// Entry names are relative to `root` with `/` separators. The archive file
/// itself is never included. Returns the archive path and entry count.
pub fn archive_directory(root: &Path) -> Result<(PathBuf, usize)> {
    let archive_path = root.join(ARCHIVE_FILENAME);

    let mut files = Vec::new();
    collect_files(root, &mut files)?;
    files.retain(|path| path != &archive_path);
    files.sort();

    let mut zip = ZipWriter::new(File::create(&archive_path)?);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &files {
        let name = entry_name(root, path);
        tracing::debug!("Archiving {}", name);

        zip.start_file(name, options)?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut zip)?;
    }

    zip.finish()?;

    tracing::info!(
        "Archived {} files into {}",
        files.len(),
        archive_path.display()
    );
    Ok((archive_path, files.len()))
}

/// Recursively collect regular files under a directory.
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&entry.path(), files)?;
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_archive_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        std::fs::create_dir_all(root.join("one")).unwrap();
        std::fs::create_dir_all(root.join("two/nested")).unwrap();
        std::fs::create_dir_all(root.join("empty")).unwrap();
        std::fs::write(root.join("one/one.mp4"), b"video").unwrap();
        std::fs::write(root.join("one/title.txt"), b"title").unwrap();
        std::fs::write(root.join("two/nested/deep.txt"), b"deep").unwrap();
        std::fs::write(root.join("top.txt"), b"top").unwrap();

        let (archive_path, count) = archive_directory(root).unwrap();
        assert_eq!(archive_path, root.join(ARCHIVE_FILENAME));
        assert_eq!(count, 4);

        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let mut names = BTreeSet::new();
        for i in 0..archive.len() {
            names.insert(archive.by_index(i).unwrap().name().to_string());
        }

        let expected: BTreeSet<String> = ["one/one.mp4", "one/title.txt", "two/nested/deep.txt", "top.txt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, expected);
        for name in &names {
            assert!(root.join(name).is_file());
        }
    }

    #[test]
    fn test_rearchive_excludes_previous_archive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();

        archive_directory(dir.path()).unwrap();
        let (_, count) = archive_directory(dir.path()).unwrap();
        assert_eq!(count, 1);
    }
}
