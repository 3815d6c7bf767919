use exif::Field;
use exif::In;
use exif::Tag;
use exif::Value;
use exif::experimental::Writer;
use image::RgbImage;
use img_parts::Bytes;
use img_parts::ImageEXIF;
use img_parts::jpeg::Jpeg;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Save a flat-colored image; the format follows the extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, image::Rgb([120, 80, 40]))
        .save(path)
        .unwrap();
}

/// A JPEG carrying `DateTimeOriginal` and, optionally, an embedded thumbnail.
pub fn write_jpeg_with_exif(path: &Path, datetime: &str, thumbnail: Option<&[u8]>) {
    let mut plain = Vec::new();
    RgbImage::from_pixel(64, 48, image::Rgb([10, 20, 30]))
        .write_to(&mut Cursor::new(&mut plain), image::ImageFormat::Jpeg)
        .unwrap();

    let field = Field {
        tag: Tag::DateTimeOriginal,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![datetime.as_bytes().to_vec()]),
    };
    let mut writer = Writer::new();
    writer.push_field(&field);
    if let Some(jpeg) = thumbnail {
        writer.set_jpeg(jpeg, In::THUMBNAIL);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();

    let mut jpeg = Jpeg::from_bytes(Bytes::from(plain)).unwrap();
    jpeg.set_exif(Some(Bytes::from(tiff.into_inner())));
    let mut out = Vec::new();
    jpeg.encoder().write_to(&mut out).unwrap();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, out).unwrap();
}
