use anyhow::Context;
use sha1::{Digest, Sha1};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Longest readable prefix kept in a stored file name, in characters.
const MAX_NAME_LEN: usize = 100;
/// Hex digits of the title hash appended to the readable prefix.
const HASH_LEN: usize = 16;
const EXTENSION: &str = "lrc";
/// Common file name limit, in bytes.
const MAX_FILE_NAME_BYTES: usize = 255;
/// Byte budget for the readable prefix once `-<hash>.lrc` is appended.
const MAX_NAME_BYTES: usize = MAX_FILE_NAME_BYTES - 1 - HASH_LEN - 1 - EXTENSION.len();

/// Persistence for the active lyrics document, keyed by the raw track title.
pub trait LyricStore {
    fn save(&self, track_title: &str, document: &str) -> anyhow::Result<PathBuf>;
    fn load(&self, track_title: &str) -> anyhow::Result<Option<String>>;
    /// Remove every stored document.
    fn clear_all(&self) -> anyhow::Result<usize>;
}

/// Plain `.lrc` files in one directory.
#[derive(Debug, Clone)]
pub struct FileLyricStore {
    dir: PathBuf,
}

impl FileLyricStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, track_title: &str) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", file_stem(track_title)))
    }
}

impl LyricStore for FileLyricStore {
    fn save(&self, track_title: &str, document: &str) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create dir {}", self.dir.display()))?;
        let path = self.path_for(track_title);
        fs::write(&path, document).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    fn load(&self, track_title: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(track_title);
        match fs::read_to_string(&path) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn clear_all(&self) -> anyhow::Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e).with_context(|| format!("read dir {}", self.dir.display())),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry.context("read dir entry")?.path();
            if is_lyrics_file(&path) {
                fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn is_lyrics_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION)
}

/// Readable, filesystem-safe prefix of the title plus a hash of the full title,
/// so distinct titles that sanitize alike still get distinct files.
fn file_stem(track_title: &str) -> String {
    let safe = sanitize(track_title);
    let hash = hex::encode(Sha1::digest(track_title.as_bytes()));
    let hash = &hash[..HASH_LEN];
    if safe.is_empty() {
        hash.to_string()
    } else {
        format!("{safe}-{hash}")
    }
}

/// Keep word characters, whitespace and hyphens; collapse whitespace; bound
/// length in both characters and bytes, cutting on a char boundary.
fn sanitize(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect();
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::new();
    for c in collapsed.chars().take(MAX_NAME_LEN) {
        if out.len() + c.len_utf8() > MAX_NAME_BYTES {
            break;
        }
        out.push(c);
    }
    out.trim_end().to_string()
}
