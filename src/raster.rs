//! Owned raster buffers.
//!
//! A [`Raster`] is the output artifact of every capture path: an RGBA
//! pixel buffer sized in raster pixels (CSS × device pixel ratio).
//! Composed document rasters own their buffer exclusively, and cropping
//! always produces a new owned buffer so the source can be discarded.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use image::{RgbaImage, imageops};

use crate::error::{Error, Result};
use crate::geometry::CropRect;

// ============================================================================
// Raster
// ============================================================================

/// An owned RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    image: RgbaImage,
}

// ============================================================================
// Raster - Constructors
// ============================================================================

impl Raster {
    /// Creates a zero-filled raster with the given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Decodes a raster from PNG bytes.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { image })
    }

    /// Decodes a raster from a base64-encoded PNG payload.
    ///
    /// Convenience for probe implementations whose transport returns
    /// screenshot data base64-encoded.
    pub fn from_base64_png(data: &str) -> Result<Self> {
        let bytes = Base64Standard.decode(data)?;
        Self::from_png_bytes(&bytes)
    }
}

// ============================================================================
// Raster - Accessors
// ============================================================================

impl Raster {
    /// Returns the width in raster pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Returns the height in raster pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns the underlying RGBA buffer.
    ///
    /// Exposed for image-comparison routines consuming the capture.
    #[inline]
    #[must_use]
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the raster and returns the underlying RGBA buffer.
    #[inline]
    #[must_use]
    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }
}

// ============================================================================
// Raster - Composition
// ============================================================================

impl Raster {
    /// Copies `rows` rows of `tile` starting at `src_row` into this
    /// raster starting at `dest_row`.
    ///
    /// Widths must match and both row ranges must be in bounds; a
    /// violation is a [`Error::StitchInconsistency`].
    pub(crate) fn paste_rows(
        &mut self,
        tile: &Raster,
        src_row: u32,
        dest_row: u32,
        rows: u32,
    ) -> Result<()> {
        if tile.width() != self.width() {
            return Err(Error::stitch_inconsistency(format!(
                "tile width {} does not match raster width {}",
                tile.width(),
                self.width()
            )));
        }
        if src_row + rows > tile.height() || dest_row + rows > self.height() {
            return Err(Error::stitch_inconsistency(format!(
                "row range {}..{} (dest {}..{}) exceeds tile height {} or raster height {}",
                src_row,
                src_row + rows,
                dest_row,
                dest_row + rows,
                tile.height(),
                self.height()
            )));
        }

        let stride = self.width() as usize * 4;
        let src_start = src_row as usize * stride;
        let dest_start = dest_row as usize * stride;
        let len = rows as usize * stride;

        let src: &[u8] = tile.image.as_raw();
        let dest: &mut [u8] = &mut self.image;
        dest[dest_start..dest_start + len].copy_from_slice(&src[src_start..src_start + len]);
        Ok(())
    }

    /// Crops to `rect`, returning a new owned raster.
    ///
    /// The rectangle must already be clamped to this raster's bounds.
    #[must_use]
    pub fn crop(&self, rect: &CropRect) -> Raster {
        let view = imageops::crop_imm(&self.image, rect.x, rect.y, rect.width, rect.height);
        Raster {
            image: view.to_image(),
        }
    }
}

// ============================================================================
// Raster - Persistence
// ============================================================================

impl Raster {
    /// Encodes the raster as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, image::ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Encodes the raster as PNG and writes it to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_png_bytes()?;
        std::fs::write(path.as_ref(), bytes).map_err(Error::Io)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
