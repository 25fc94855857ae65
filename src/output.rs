// src/output.rs
//! Output writing. Every document is written once, at end of run: serialize
//! to a temp file next to the target, then rename it into place.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Write `contents` atomically, creating parent directories as needed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    let tmp = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => path.with_extension(format!("{ext}.tmp")),
        None => path.with_extension("tmp"),
    };
    fs::write(&tmp, contents).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("moving {} into place", tmp.display()))?;
    Ok(())
}

/// Pretty-printed JSON document.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_vec_pretty(value).context("serializing output")?;
    write_atomic(path, &body)?;
    info!(file = %path.display(), bytes = body.len(), "wrote output");
    Ok(())
}

/// Compact JSON document.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_vec(value).context("serializing output")?;
    write_atomic(path, &body)?;
    info!(file = %path.display(), bytes = body.len(), "wrote output");
    Ok(())
}

/// Plain text document (the M3U playlist).
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())?;
    info!(file = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/playlist.json");
        write_json_pretty(&path, &vec![1, 2, 3]).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let body = fs::read_to_string(&path).unwrap();
        let parsed: Vec<u32> = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn compact_and_pretty_differ_in_layout_only() {
        let dir = tempfile::tempdir().unwrap();
        let compact = dir.path().join("compact.json");
        let pretty = dir.path().join("pretty.json");
        let value = serde_json::json!({"a": 1, "b": [1, 2]});
        write_json(&compact, &value).unwrap();
        write_json_pretty(&pretty, &value).unwrap();
        let compact_body = fs::read_to_string(&compact).unwrap();
        let pretty_body = fs::read_to_string(&pretty).unwrap();
        assert!(!compact_body.contains('\n'));
        assert!(pretty_body.contains('\n'));
        let a: serde_json::Value = serde_json::from_str(&compact_body).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty_body).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rewrites_replace_the_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playlist.m3u8");
        write_text(&path, "#EXTM3U\nfirst\n").unwrap();
        write_text(&path, "#EXTM3U\nsecond\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "#EXTM3U\nsecond\n");
    }
}
