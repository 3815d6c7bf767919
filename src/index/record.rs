use crate::index::csv_row::encode_row;

/// One photo observation: where it is, where its thumbnail went, and when it
/// was taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub filepath: String,
    pub thumbpath: String,
    /// `YYYY:MM:DD HH:MM:SS` or `NONE`.
    pub datetime: String,
}

impl Record {
    pub const FIELD_COUNT: usize = 4;

    /// Build a record from the four CSV columns, in file order.
    #[must_use]
    pub fn from_fields(fields: Vec<String>) -> Option<Record> {
        let [key, filepath, thumbpath, datetime]: [String; Self::FIELD_COUNT] =
            fields.try_into().ok()?;
        Some(Record {
            key,
            filepath,
            thumbpath,
            datetime,
        })
    }

    #[must_use]
    pub fn to_csv_row(&self) -> String {
        encode_row(&[&self.key, &self.filepath, &self.thumbpath, &self.datetime])
    }
}
