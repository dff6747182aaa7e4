//! ZIP container abstraction for OOXML documents.
//!
//! A package is the full archive read into memory: the adapters mutate
//! individual parts and the pipeline serializes the result. Entry order
//! is preserved so untouched parts round-trip byte for byte.

use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::errors::DocumentError;

/// One file inside the container
#[derive(Debug, Clone)]
struct PackageEntry {
    /// Entry path inside the archive (forward slashes)
    name: String,
    /// Raw entry bytes
    data: Vec<u8>,
}

/// An OOXML document container held fully in memory
#[derive(Debug, Clone, Default)]
pub struct OoxmlPackage {
    entries: Vec<PackageEntry>,
}

impl OoxmlPackage {
    /// Create an empty package (used by the notice-document builders)
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a package from a file path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let mut file = File::open(path.as_ref())?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Open a package from a byte vector
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, DocumentError> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push(PackageEntry { name, data });
        }
        Ok(Self { entries })
    }

    /// Check if a part exists in the package
    pub fn has_part(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Names of all parts, in archive order
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Raw bytes of a part
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.data.as_slice())
    }

    /// Read a part as an XML string.
    ///
    /// Strips a UTF-8 BOM when present; other byte sequences fall back
    /// to lossy decoding rather than failing the whole document.
    pub fn part_str(&self, name: &str) -> Result<String, DocumentError> {
        let bytes = self
            .part(name)
            .ok_or_else(|| DocumentError::Corrupted(format!("missing package part: {}", name)))?;
        let bytes = match bytes {
            [0xEF, 0xBB, 0xBF, rest @ ..] => rest,
            _ => bytes,
        };
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Replace a part's content, or add the part if it does not exist
    pub fn put_part(&mut self, name: impl Into<String>, data: Vec<u8>) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) {
            entry.data = data;
        } else {
            self.entries.push(PackageEntry { name, data });
        }
    }

    /// Serialize the package to a writer
    fn write_to<W: Write + std::io::Seek>(&self, writer: W) -> Result<(), DocumentError> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for entry in &self.entries {
            zip.start_file(entry.name.as_str(), options)?;
            zip.write_all(&entry.data)?;
        }
        zip.finish()?;
        Ok(())
    }

    /// Serialize the package to a file path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)
    }

    /// Serialize the package to a byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}
