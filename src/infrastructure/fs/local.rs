//! Local file helpers

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{StackError, StackResult};

/// Write `content` to `path` atomically.
///
/// The bytes go to a temp file in the same directory which is then renamed
/// over the target, so readers never observe a partial document. Parent
/// directories are created as needed.
pub fn atomic_write(path: &Path, content: &[u8]) -> StackResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| StackError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StackError::io(parent, e))?;
    tmp.write_all(content)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| StackError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StackError::io(path, e.error))?;
    Ok(())
}
