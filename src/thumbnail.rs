//! Thumbnail synthesis for the supported image formats.

use crate::error::Error;
use crate::error::Result;
use image::DynamicImage;
use image::ImageFormat;
use image::imageops::FilterType;
use std::io::BufRead;
use std::io::Cursor;
use std::io::Seek;
use std::path::Path;

/// Width of every synthesized thumbnail; height follows the aspect ratio.
pub const THUMBNAIL_WIDTH: u32 = 200;

/// The image formats the index accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageCodec {
    Jpeg,
    Png,
    Tiff,
}

impl ImageCodec {
    /// Match a bare extension (no dot), case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Tiff => ImageFormat::Tiff,
        }
    }

    /// Decode, shrink and re-encode an image in this codec's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the reader does not hold a decodable image of
    /// this format and [`Error::Encode`] if the thumbnail cannot be encoded.
    pub fn synthesize<R: BufRead + Seek>(self, reader: R) -> Result<Vec<u8>> {
        let img = image::load(reader, self.image_format()).map_err(Error::Decode)?;
        let thumb = resize_to_width(&img, THUMBNAIL_WIDTH);
        let thumb = match self {
            // the JPEG encoder only takes 8-bit gray or RGB
            Self::Jpeg => DynamicImage::ImageRgb8(thumb.to_rgb8()),
            Self::Png | Self::Tiff => thumb,
        };

        let mut data = Vec::new();
        thumb
            .write_to(&mut Cursor::new(&mut data), self.image_format())
            .map_err(Error::Encode)?;
        Ok(data)
    }
}

impl TryFrom<&Path> for ImageCodec {
    type Error = Error;

    fn try_from(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::Unsupported(path.to_path_buf()))
    }
}

/// Height that keeps the aspect ratio of a `width` x `height` image scaled to
/// `target_width`, rounded the way the thumbnails have always been rounded.
#[must_use]
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 1;
    }
    let scaled = 0.7 + f64::from(height) * f64::from(target_width) / f64::from(width);
    // Truncation is the rounding rule; the value is positive and well within u32.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = scaled as u32;
    scaled.max(1)
}

/// Lanczos3 resize to an exact width, preserving the aspect ratio.
#[must_use]
pub fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    let height = scaled_height(img.width(), img.height(), width);
    img.resize_exact(width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use image::RgbImage;
    use std::path::PathBuf;

    fn encoded(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut data = Vec::new();
        img.write_to(&mut Cursor::new(&mut data), format).unwrap();
        data
    }

    #[test]
    fn codec_matches_extensions_case_insensitively() {
        for (name, codec) in [
            ("a.jpg", ImageCodec::Jpeg),
            ("a.JPG", ImageCodec::Jpeg),
            ("a.png", ImageCodec::Png),
            ("a.Png", ImageCodec::Png),
            ("a.tif", ImageCodec::Tiff),
            ("a.TIFF", ImageCodec::Tiff),
        ] {
            assert_eq!(ImageCodec::try_from(PathBuf::from(name).as_path()).unwrap(), codec);
        }
        for name in ["a.jpeg", "a.gif", "a.txt", "noext", "thumbs"] {
            assert!(matches!(
                ImageCodec::try_from(PathBuf::from(name).as_path()),
                Err(Error::Unsupported(_))
            ));
        }
    }

    #[test]
    fn scaled_height_keeps_aspect() {
        assert_eq!(scaled_height(400, 300, 200), 150);
        assert_eq!(scaled_height(300, 400, 200), 267);
        assert_eq!(scaled_height(4000, 10, 200), 1);
        assert_eq!(scaled_height(0, 10, 200), 1);
    }

    #[test]
    fn synthesizes_each_format() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 300, Rgb([10, 120, 200])));
        for codec in [ImageCodec::Jpeg, ImageCodec::Png, ImageCodec::Tiff] {
            let input = encoded(&src, codec.image_format());
            let thumb = codec.synthesize(Cursor::new(input)).unwrap();
            assert_eq!(image::guess_format(&thumb).unwrap(), codec.image_format());
            let decoded = image::load_from_memory(&thumb).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (200, 150));
        }
    }

    #[test]
    fn wrong_format_is_a_decode_failure() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
        let png = encoded(&src, ImageFormat::Png);
        assert!(matches!(
            ImageCodec::Jpeg.synthesize(Cursor::new(png)),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            ImageCodec::Png.synthesize(Cursor::new(b"not an image".to_vec())),
            Err(Error::Decode(_))
        ));
    }
}
