//! Scratch directories for file-based tests

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Per-test directory from `tempfile`, removed when dropped
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("partition-vis-{name}-"))
            .tempdir()
            .expect("create scratch dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, file: &str, contents: &str) {
        fs::write(self.path().join(file), contents).expect("write scratch file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_gets_distinct_directories() {
        let a = ScratchDir::new("shared");
        let b = ScratchDir::new("shared");
        assert_ne!(a.path(), b.path());

        a.write("points_data_rank_0.txt", "1 2 3\n");
        assert!(a.path().join("points_data_rank_0.txt").is_file());
        assert!(!b.path().join("points_data_rank_0.txt").exists());
    }

    #[test]
    fn test_directory_removed_on_drop() {
        let scratch = ScratchDir::new("dropped");
        scratch.write("octree_data_global.txt", "0 0 0 1 0\n");
        let path = scratch.path().to_path_buf();
        assert!(path.is_dir());

        drop(scratch);
        assert!(!path.exists());
    }
}
