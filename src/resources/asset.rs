use anyhow::{Context, Result, ensure};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// 1x1 PNG served for the binary resource path.
pub static TINY_PNG: &[u8] = include_bytes!("../../assets/tiny.png");

/// Upper bound on an asset read from disk.
pub const MAX_ASSET_BYTES: u64 = 1024 * 1024;

/// Source of the bytes served for the binary resource path.
pub trait AssetSource: Send + Sync {
    /// Loads the asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset cannot be read.
    fn load(&self) -> Result<Cow<'static, [u8]>>;
}

/// Asset compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset {
    bytes: &'static [u8],
}

impl EmbeddedAsset {
    #[must_use]
    pub const fn new(bytes: &'static [u8]) -> Self {
        Self { bytes }
    }
}

impl Default for EmbeddedAsset {
    fn default() -> Self {
        Self::new(TINY_PNG)
    }
}

impl AssetSource for EmbeddedAsset {
    fn load(&self) -> Result<Cow<'static, [u8]>> {
        Ok(Cow::Borrowed(self.bytes))
    }
}

/// Asset read from the filesystem on every request.
#[derive(Debug, Clone)]
pub struct FileAsset {
    path: PathBuf,
}

impl FileAsset {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AssetSource for FileAsset {
    fn load(&self) -> Result<Cow<'static, [u8]>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open asset {}", self.path.display()))?;

        let mut bytes = Vec::new();
        file.take(MAX_ASSET_BYTES + 1)
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read asset {}", self.path.display()))?;

        ensure!(
            bytes.len() as u64 <= MAX_ASSET_BYTES,
            "Asset {} exceeds {MAX_ASSET_BYTES} bytes",
            self.path.display()
        );

        Ok(Cow::Owned(bytes))
    }
}
