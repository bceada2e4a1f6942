// src/gallery.rs

//! Asset materialization for the picture gallery
//!
//! Downloads the image behind a descriptor, canonicalizes it to PNG on an
//! opaque canvas, and writes it beneath a per-title path inside the gallery
//! root. A path that already holds content is never overwritten, so
//! materializing the same title twice performs exactly one disk write.
//!
//! The gallery outlives the catalog: deleting an entry never removes its
//! picture. The gallery directory is a persistent picture library, the
//! catalog a searchable index over it.

use crate::client::{ApodClient, Descriptor};
use crate::error::{Error, Result};
use image::{DynamicImage, ImageFormat, RgbImage, Rgba, RgbaImage, imageops};
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk format every asset is canonicalized to
const ASSET_FORMAT: ImageFormat = ImageFormat::Png;

/// File extension matching [`ASSET_FORMAT`]
const ASSET_EXTENSION: &str = "png";

/// Materialize the descriptor's asset into the gallery
///
/// Downloads the image, canonicalizes it, and persists it under
/// `<gallery_root>/<title>.png`. Idempotent per title: a second call finds
/// the file in place and returns the existing path.
pub fn materialize(
    client: &ApodClient,
    descriptor: &Descriptor,
    gallery_root: &Path,
    progress: Option<&ProgressBar>,
) -> Result<PathBuf> {
    let bytes = client.download_to_bytes_with_progress(&descriptor.url, progress)?;
    let canonical = canonicalize(&bytes)?;
    write_asset(&canonical, gallery_root, &descriptor.title)
}

/// Decode raw image bytes and re-encode them onto an opaque canvas
///
/// The canvas is white and sized to the source image, so arbitrary source
/// formats (including ones with transparency) normalize to one persisted
/// representation.
pub fn canonicalize(bytes: &[u8]) -> Result<RgbImage> {
    let source = image::load_from_memory(bytes)
        .map_err(|e| Error::EncodeError(format!("Failed to decode image: {e}")))?
        .to_rgba8();

    let mut canvas =
        RgbaImage::from_pixel(source.width(), source.height(), Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &source, 0, 0);

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

/// Write a canonical image beneath its per-title path
///
/// Creates the gallery root as needed. If the target path already holds
/// content the write is skipped and the existing path returned; identical
/// titles never overwrite each other's asset.
pub fn write_asset(image: &RgbImage, gallery_root: &Path, title: &str) -> Result<PathBuf> {
    fs::create_dir_all(gallery_root).map_err(|e| {
        Error::IoError(format!(
            "Failed to create gallery directory {}: {e}",
            gallery_root.display()
        ))
    })?;

    let target = asset_path(gallery_root, title);
    if target.exists() {
        debug!("Asset already present, skipping write: {}", target.display());
        return Ok(target);
    }

    image
        .save_with_format(&target, ASSET_FORMAT)
        .map_err(|e| Error::EncodeError(format!("Failed to save {}: {e}", target.display())))?;

    info!("Saved asset to {}", target.display());
    Ok(target)
}

/// Compute the deterministic per-title asset path
pub fn asset_path(gallery_root: &Path, title: &str) -> PathBuf {
    gallery_root.join(format!("{}.{}", sanitize_title(title), ASSET_EXTENSION))
}

/// Replace characters a title cannot carry into a filename
///
/// Equal titles must always map to equal paths, and no title may escape the
/// gallery root.
fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if std::path::is_separator(c) || c == '\0' {
                '-'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Encode a solid RGBA image as PNG bytes
    fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, pixel);
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_canonicalize_keeps_dimensions() {
        let bytes = png_bytes(4, 3, Rgba([10, 20, 30, 255]));
        let canonical = canonicalize(&bytes).unwrap();
        assert_eq!(canonical.dimensions(), (4, 3));
        assert_eq!(canonical.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_canonicalize_flattens_transparency_onto_white() {
        // Half-transparent pure red over the white canvas
        let bytes = png_bytes(2, 2, Rgba([255, 0, 0, 128]));
        let canonical = canonicalize(&bytes).unwrap();

        let [r, g, b] = canonical.get_pixel(1, 1).0;
        assert_eq!(r, 255);
        assert!((120..=135).contains(&g), "green channel was {}", g);
        assert!((120..=135).contains(&b), "blue channel was {}", b);
    }

    #[test]
    fn test_canonicalize_rejects_garbage() {
        let result = canonicalize(b"not an image at all");
        assert!(matches!(result, Err(Error::EncodeError(_))));
    }

    #[test]
    fn test_write_asset_skips_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();

        let first = RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        let path1 = write_asset(&first, root, "Nebula Glow").unwrap();
        let original_bytes = fs::read(&path1).unwrap();

        // A different image under the same title must not overwrite
        let second = RgbImage::from_pixel(2, 2, image::Rgb([200, 200, 200]));
        let path2 = write_asset(&second, root, "Nebula Glow").unwrap();

        assert_eq!(path1, path2);
        assert_eq!(fs::read(&path2).unwrap(), original_bytes);
        assert_eq!(fs::read_dir(root).unwrap().count(), 1);
    }

    #[test]
    fn test_asset_path_is_deterministic_and_contained() {
        let root = Path::new("/gallery");

        assert_eq!(
            asset_path(root, "Nebula Glow"),
            asset_path(root, "Nebula Glow")
        );

        let tricky = asset_path(root, "../escape/attempt");
        assert_eq!(tricky.parent(), Some(root));
        assert_eq!(
            tricky.file_name().unwrap().to_str().unwrap(),
            "..-escape-attempt.png"
        );
    }
}
