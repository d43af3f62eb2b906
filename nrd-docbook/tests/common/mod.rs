use std::{
  fs,
  path::{Path, PathBuf},
};

/// Write a chapter source into `dir` and return its path.
pub fn write_chapter(dir: &Path, name: &str, content: &str) -> PathBuf {
  let path = dir.join(name);
  #[allow(clippy::expect_used, reason = "Fine in tests")]
  fs::write(&path, content).expect("Failed to write chapter in test");
  path
}
