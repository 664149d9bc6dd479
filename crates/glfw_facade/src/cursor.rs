//! Cursor images
//!
//! [`Image`] is the RGBA8 pixel container shared by cursors and window icons.
//! [`Cursor`] owns one native cursor built from an image or a standard shape.

use crate::context::Context;
use crate::destroy::{Destroyable, ReleaseGuard};
use crate::error::{FacadeError, FacadeResult};
use crate::handle::{Handle, NativeHandle, PointerHandle};
use crate::input::StandardCursor;
use std::path::Path;

/// Non-premultiplied RGBA8 pixels, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap raw RGBA bytes, checking that the length matches the dimensions
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> FacadeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(4))
            .unwrap_or(usize::MAX);
        if pixels.len() != expected {
            return Err(FacadeError::InvalidImage {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// An image filled with one colour
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: rgba.repeat(count),
        }
    }

    /// Decode an image file
    pub fn from_file(path: impl AsRef<Path>) -> FacadeResult<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| FacadeError::ImageLoad(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded {}x{} image from {}", decoded.width(), decoded.height(), path.display());
        Ok(Self::from_decoded(decoded))
    }

    /// Decode an in-memory encoded image
    pub fn from_bytes(bytes: &[u8]) -> FacadeResult<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| FacadeError::ImageLoad(e.to_string()))?;
        Ok(Self::from_decoded(decoded))
    }

    fn from_decoded(decoded: image::DynamicImage) -> Self {
        let rgba = decoded.to_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Native layout: one `u32` per pixel holding the RGBA bytes in memory order
    pub(crate) fn to_pixel_image(&self) -> glfw::PixelImage {
        glfw::PixelImage {
            width: self.width,
            height: self.height,
            pixels: bytemuck::pod_collect_to_vec(&self.pixels),
        }
    }
}

/// A native cursor
///
/// Released by [`Destroyable::destroy`] or on drop. A destroyed cursor must not
/// be installed on a window.
#[derive(Debug)]
pub struct Cursor {
    context: Context,
    pointer: PointerHandle,
    guard: ReleaseGuard,
}

impl Cursor {
    /// Create a cursor from an image; the pixels are copied by the native layer
    ///
    /// The hotspot is relative to the image's upper-left corner.
    pub fn new(context: &Context, image: &Image, hot_x: u32, hot_y: u32) -> FacadeResult<Self> {
        let handle = context.platform().create_cursor(image, hot_x, hot_y);
        let cursor = Self::adopt(context, handle)?;
        log::debug!("Created {}x{} cursor {:?}", image.width(), image.height(), handle);
        Ok(cursor)
    }

    /// Create a cursor with a platform-provided shape
    pub fn standard(context: &Context, shape: StandardCursor) -> FacadeResult<Self> {
        let handle = context.platform().create_standard_cursor(shape);
        let cursor = Self::adopt(context, handle)?;
        log::debug!("Created {:?} cursor {:?}", shape, handle);
        Ok(cursor)
    }

    fn adopt(context: &Context, handle: Handle) -> FacadeResult<Self> {
        Ok(Self {
            context: context.clone(),
            pointer: PointerHandle::created(handle, "cursor")?,
            guard: ReleaseGuard::new(),
        })
    }
}

impl NativeHandle for Cursor {
    fn handle(&self) -> Handle {
        self.pointer.handle()
    }
}

impl Destroyable for Cursor {
    fn is_destroyed(&self) -> bool {
        self.guard.is_released()
    }

    fn destroy(&mut self) {
        if self.guard.release() {
            self.context.platform().destroy_cursor(self.handle());
            log::debug!("Destroyed cursor {:?}", self.handle());
        }
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;

    #[test]
    fn test_rgba_length_is_checked() {
        assert!(Image::from_rgba(2, 2, vec![0; 16]).is_ok());
        match Image::from_rgba(2, 2, vec![0; 15]) {
            Err(FacadeError::InvalidImage { expected, actual, .. }) => assert_eq!((expected, actual), (16, 15)),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_solid_image_repeats_colour() {
        let image = Image::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(image.pixels().len(), 24);
        assert_eq!(&image.pixels()[20..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_pixel_image_keeps_byte_order() {
        let image = Image::from_rgba(1, 1, vec![0x11, 0x22, 0x33, 0x44]).unwrap();
        let native = image.to_pixel_image();
        assert_eq!(native.pixels.len(), 1);
        assert_eq!(native.pixels[0].to_ne_bytes(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_png_bytes_decode() {
        let mut encoded = Vec::new();
        image::RgbaImage::from_pixel(4, 3, image::Rgba([9, 8, 7, 255]))
            .write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
            .unwrap();

        let decoded = Image::from_bytes(&encoded).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
        assert_eq!(decoded, Image::solid(4, 3, [9, 8, 7, 255]));
        assert!(matches!(Image::from_bytes(b"not an image"), Err(FacadeError::ImageLoad(_))));
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let platform = HeadlessPlatform::new();
        let context = Context::new(platform.clone());
        let mut cursor = Cursor::new(&context, &Image::solid(16, 16, [255; 4]), 0, 0).unwrap();

        assert!(!cursor.is_destroyed());
        cursor.destroy();
        cursor.destroy();
        assert!(cursor.is_destroyed());
        assert_eq!(platform.cursor_count(), 0);
        assert!(platform.errors().is_empty());
    }

    #[test]
    fn test_drop_releases_cursor() {
        let platform = HeadlessPlatform::new();
        let context = Context::new(platform.clone());
        {
            let _cursor = Cursor::standard(&context, StandardCursor::Hand).unwrap();
            assert_eq!(platform.cursor_count(), 1);
        }
        assert_eq!(platform.cursor_count(), 0);
    }

    #[test]
    fn test_null_handle_is_creation_failure() {
        let platform = HeadlessPlatform::new();
        let context = Context::new(platform.clone());
        platform.fail_next_cursor_creation();

        let result = Cursor::standard(&context, StandardCursor::Arrow);
        assert!(matches!(result, Err(FacadeError::CreationFailed("cursor"))));
    }

    #[test]
    #[ignore = "requires a display"]
    fn test_glfw_custom_cursor() {
        let context = Context::glfw(&crate::config::FacadeConfig::default()).unwrap();
        let image = Image::solid(16, 16, [255, 0, 0, 255]);
        let mut cursor = Cursor::new(&context, &image, 8, 8).unwrap();
        assert!(!cursor.handle().is_null());
        cursor.destroy();
    }
}
