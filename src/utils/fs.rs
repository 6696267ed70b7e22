//! Recursive tree maintenance for the install directory.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Create a single directory, treating an already-existing one as success.
pub fn make_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(err).with_context(|| format!("could not create {}", path.display())),
    }
}

/// Merge the `patch` tree into `dir`, consuming `patch`.
///
/// Entries present in both sides are merged when both are directories and
/// overwritten by the patch side otherwise. Entries only in `patch` are moved
/// across. After a full run `patch` holds no files, only directory husks.
pub fn patch_dirs(dir: &Path, patch: &Path) -> Result<()> {
    for entry in fs::read_dir(patch).with_context(|| format!("could not read {}", patch.display()))? {
        let entry = entry?;
        let source = entry.path();
        let dest = dir.join(entry.file_name());

        if dest.is_dir() && source.is_dir() {
            patch_dirs(&dest, &source)?;
            continue;
        }
        if dest.exists() && !dest.is_dir() {
            fs::remove_file(&dest)?;
        }
        fs::rename(&source, &dest)?;
    }
    Ok(())
}

/// Delete a directory tree depth-first. A missing path is not an error.
pub fn rmdir_all(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let child = entry.path();
        if child.is_dir() {
            rmdir_all(&child)?;
        } else {
            fs::remove_file(&child)?;
        }
    }
    fs::remove_dir(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn make_dir_tolerates_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("sub");
        make_dir(&dir).unwrap();
        make_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn make_dir_fails_without_parent() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(make_dir(&tmp.path().join("missing/sub")).is_err());
    }

    #[test]
    fn patch_overwrites_conflicts_and_keeps_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("dir");
        let patch = tmp.path().join("patch");

        write(&dir.join("keep.txt"), "keep");
        write(&dir.join("conflict.txt"), "old");
        write(&dir.join("config/shared.cfg"), "old");
        write(&patch.join("conflict.txt"), "new");
        write(&patch.join("config/extra.cfg"), "extra");
        write(&patch.join("fresh/only.txt"), "only");

        patch_dirs(&dir, &patch).unwrap();

        assert_eq!(fs::read_to_string(dir.join("keep.txt")).unwrap(), "keep");
        assert_eq!(fs::read_to_string(dir.join("conflict.txt")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dir.join("config/shared.cfg")).unwrap(), "old");
        assert_eq!(fs::read_to_string(dir.join("config/extra.cfg")).unwrap(), "extra");
        assert_eq!(fs::read_to_string(dir.join("fresh/only.txt")).unwrap(), "only");
    }

    #[test]
    fn patch_leaves_no_files_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("dir");
        let patch = tmp.path().join("patch");

        fs::create_dir_all(&dir).unwrap();
        fs::create_dir_all(dir.join("config")).unwrap();
        write(&patch.join("a.txt"), "a");
        write(&patch.join("config/b.txt"), "b");

        patch_dirs(&dir, &patch).unwrap();

        let mut leftovers = Vec::new();
        collect_files(&patch, &mut leftovers);
        assert!(leftovers.is_empty(), "patch tree still holds {leftovers:?}");
    }

    fn collect_files(path: &Path, out: &mut Vec<std::path::PathBuf>) {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let child = entry.path();
                if child.is_dir() {
                    collect_files(&child, out);
                } else {
                    out.push(child);
                }
            }
        }
    }

    #[test]
    fn rmdir_removes_nested_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("tree");
        write(&root.join("a/b/c.txt"), "c");
        write(&root.join("d.txt"), "d");

        rmdir_all(&root).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn rmdir_is_a_noop_on_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        rmdir_all(&tmp.path().join("nothing/here")).unwrap();
    }
}
