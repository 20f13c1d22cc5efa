use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A raster image written to disk by one of the renderers.
///
/// The artifact does not own the file: whoever asked for it decides when
/// the file is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArtifact {
    pub path: PathBuf,
    pub width_px: u32,
    pub height_px: u32,
}

impl ImageArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    /// The PNG file encoded for transfer inside a JSON payload.
    pub fn to_base64(&self) -> io::Result<String> {
        Ok(STANDARD.encode(self.read_bytes()?))
    }
}

/// A collision-free file path for a new artifact inside `dir`.
///
/// The random token keeps concurrent requests sharing one directory from
/// overwriting each other's images.
pub fn artifact_path(dir: &Path, prefix: &str) -> PathBuf {
    dir.join(format!("{}_{:016x}.png", prefix, rand::random::<u64>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_unique_per_call() {
        let dir = Path::new("/tmp/work");
        let a = artifact_path(dir, "chart");
        let b = artifact_path(dir, "chart");
        assert_ne!(a, b);
        assert!(a.starts_with(dir));
        let name = a.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("chart_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "chart_".len() + 16 + ".png".len());
    }
}
