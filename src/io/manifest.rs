// src/io/manifest.rs
//
// Listing of the auxiliary data folder.

use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

const IMAGE_EXTS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];
const TEXT_EXTS: [&str; 9] = ["json", "txt", "csv", "obj", "mtl", "gltf", "glsl", "md", "log"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Text,
    Binary,
}

impl FileKind {
    /// By extension, case-insensitive. No extension means binary.
    pub fn infer(name: &str) -> FileKind {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some(e) if IMAGE_EXTS.contains(&e) => FileKind::Image,
            Some(e) if TEXT_EXTS.contains(&e) => FileKind::Text,
            _ => FileKind::Binary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub size: u64,
    /// Milliseconds since the Unix epoch.
    pub mtime: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Manifest {
    pub files: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn to_json(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(ManifestError::Encode)
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

#[derive(Debug)]
pub enum ManifestError {
    /// The folder exists but could not be read.
    Retrieval { path: PathBuf, source: io::Error },
    Encode(serde_json::Error),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Retrieval { path, source } => {
                write!(f, "could not list {}: {}", path.display(), source)
            }
            ManifestError::Encode(e) => write!(f, "could not encode manifest: {}", e),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Retrieval { source, .. } => Some(source),
            ManifestError::Encode(e) => Some(e),
        }
    }
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Lists the regular files directly inside `dir`, sorted by name.
/// A folder that does not exist yields an empty manifest.
pub fn scan(dir: &Path) -> Result<Manifest, ManifestError> {
    let retrieval = |source: io::Error| ManifestError::Retrieval {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Manifest::default()),
        Err(e) => return Err(retrieval(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(retrieval)?;
        let meta = entry.metadata().map_err(retrieval)?;
        if !meta.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        files.push(ManifestEntry {
            kind: FileKind::infer(&name),
            size: meta.len(),
            mtime,
            url: format!("/data/{}", encode_component(&name)),
            name,
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Manifest { files })
}
