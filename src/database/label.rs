use crate::photo_metadata::NO_DATETIME;
use chrono::Datelike;
use chrono::Month;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Label for photos with no usable capture time.
pub const UNDATED: &str = "undated";

/// Layout of the datetime column, as EXIF writes it.
pub const DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Cameras with an unset clock write this instead of leaving the tag out.
const ZERO_DATETIME: &str = "0000:00:00 00:00:00";

/// `d` marks a digit; every other byte must match exactly.
const DATETIME_SHAPE: &[u8; 19] = b"dddd:dd:dd dd:dd:dd";

#[derive(Debug, Error)]
pub enum DatetimeError {
    #[error("not in YYYY:MM:DD HH:MM:SS form")]
    Shape,
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

fn has_datetime_shape(datetime: &str) -> bool {
    datetime.len() == DATETIME_SHAPE.len()
        && datetime
            .bytes()
            .zip(DATETIME_SHAPE)
            .all(|(b, &want)| if want == b'd' { b.is_ascii_digit() } else { b == want })
}

/// The labels a record's datetime puts it under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateLabels {
    /// Four-digit year and full month name.
    Dated { year: String, month: String },
    Undated,
}

/// Classify a datetime column value.
///
/// # Errors
///
/// Returns [`DatetimeError::Shape`] unless the value is exactly
/// `YYYY:MM:DD HH:MM:SS`, and [`DatetimeError::Parse`] for an impossible date.
pub fn date_labels(datetime: &str) -> Result<DateLabels, DatetimeError> {
    if datetime == NO_DATETIME || datetime == ZERO_DATETIME {
        return Ok(DateLabels::Undated);
    }
    if !has_datetime_shape(datetime) {
        return Err(DatetimeError::Shape);
    }
    let dt = NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT)?;
    let month = u8::try_from(dt.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or_else(String::new, |m| m.name().to_string());
    Ok(DateLabels::Dated {
        year: dt.format("%Y").to_string(),
        month,
    })
}
