//! EXIF lookups used while indexing.

use exif::Exif;
use exif::In;
use exif::Tag;
use exif::Value;
use std::io::BufRead;
use std::io::Seek;
use tracing::trace;

/// Datetime stored for photos without a readable capture time.
pub const NO_DATETIME: &str = "NONE";

/// What the index needs from a photo's EXIF block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhotoMetadata {
    /// Capture time in `YYYY:MM:DD HH:MM:SS` form.
    pub datetime: Option<String>,
    /// JPEG thumbnail stored in IFD1, byte for byte.
    pub embedded_thumbnail: Option<Vec<u8>>,
}

impl PhotoMetadata {
    /// Read the EXIF block from any container `kamadak-exif` understands.
    ///
    /// Any failure (no EXIF, truncated file, unreadable) yields empty metadata.
    pub fn read_from<R: BufRead + Seek>(reader: &mut R) -> Self {
        match exif::Reader::new().read_from_container(reader) {
            Ok(exif) => Self::from_exif(&exif),
            Err(e) => {
                trace!("no usable EXIF: {e}");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn from_exif(exif: &Exif) -> Self {
        Self {
            datetime: capture_datetime(exif),
            embedded_thumbnail: embedded_thumbnail(exif),
        }
    }

    /// The datetime column value for the index.
    #[must_use]
    pub fn datetime_or_sentinel(&self) -> String {
        self.datetime
            .clone()
            .unwrap_or_else(|| NO_DATETIME.to_string())
    }
}

/// DateTimeOriginal, normalized to `YYYY:MM:DD HH:MM:SS`.
fn capture_datetime(exif: &Exif) -> Option<String> {
    let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
    match field.value {
        Value::Ascii(ref vec) if !vec.is_empty() => {
            let dt = exif::DateTime::from_ascii(&vec[0]).ok()?;
            Some(format!(
                "{:04}:{:02}:{:02} {:02}:{:02}:{:02}",
                dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
            ))
        }
        _ => None,
    }
}

/// The IFD1 JPEG thumbnail. Its offset is relative to the TIFF header, which is
/// where `Exif::buf` starts.
fn embedded_thumbnail(exif: &Exif) -> Option<Vec<u8>> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)?;
    let len = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)?;
    let start = usize::try_from(offset).ok()?;
    let end = start.checked_add(usize::try_from(len).ok()?)?;
    exif.buf()
        .get(start..end)
        .filter(|bytes| !bytes.is_empty())
        .map(<[u8]>::to_vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exif::Field;
    use exif::experimental::Writer;
    use std::io::Cursor;

    fn tiff_with(fields: &[Field], thumbnail: Option<&[u8]>) -> Vec<u8> {
        let mut writer = Writer::new();
        for field in fields {
            writer.push_field(field);
        }
        if let Some(jpeg) = thumbnail {
            writer.set_jpeg(jpeg, In::THUMBNAIL);
        }
        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();
        buf.into_inner()
    }

    fn ascii(tag: Tag, s: &str) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![s.as_bytes().to_vec()]),
        }
    }

    #[test]
    fn reads_datetime_and_thumbnail() {
        let thumb = [0xFF, 0xD8, 0x01, 0x02, 0x03, 0xFF, 0xD9];
        let tiff = tiff_with(
            &[ascii(Tag::DateTimeOriginal, "2004:04:25 02:20:24")],
            Some(&thumb),
        );
        let meta = PhotoMetadata::read_from(&mut Cursor::new(tiff));
        assert_eq!(meta.datetime.as_deref(), Some("2004:04:25 02:20:24"));
        assert_eq!(meta.embedded_thumbnail.as_deref(), Some(&thumb[..]));
    }

    #[test]
    fn missing_tag_means_no_datetime() {
        let tiff = tiff_with(&[ascii(Tag::Make, "CASIO")], None);
        let meta = PhotoMetadata::read_from(&mut Cursor::new(tiff));
        assert_eq!(meta, PhotoMetadata::default());
        assert_eq!(meta.datetime_or_sentinel(), NO_DATETIME);
    }

    #[test]
    fn blank_datetime_is_treated_as_missing() {
        let tiff = tiff_with(&[ascii(Tag::DateTimeOriginal, "    :  :     :  :  ")], None);
        let meta = PhotoMetadata::read_from(&mut Cursor::new(tiff));
        assert_eq!(meta.datetime, None);
    }

    #[test]
    fn garbage_yields_empty_metadata() {
        let meta = PhotoMetadata::read_from(&mut Cursor::new(b"definitely not exif".to_vec()));
        assert_eq!(meta, PhotoMetadata::default());
    }
}
