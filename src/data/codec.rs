//! Wire codec for the flat snapshot format.
//!
//! Every record is a single line of `|`-separated fields; a collection is the
//! newline-joined sequence of its record lines. Field values are written
//! unescaped, so `|` and newlines must not appear inside them — a known
//! limitation of the format, not something the codec guards against.
//!
//! Decoding is tolerant: blank lines, lines with too few fields and lines
//! whose numeric fields fail to parse are dropped, never fatal. Extra
//! trailing fields on a line are ignored so newer writers stay readable.

use crate::data::models::{Appointment, Doctor, Patient};

/// Reserved delimiter between fields of a record line
pub const FIELD_SEPARATOR: &str = "|";

/// A record that can round-trip through the line format
pub trait WireRecord: Sized {
    /// Minimum number of fields a well-formed line carries
    const FIELD_COUNT: usize;

    /// The record's fields in wire order
    fn fields(&self) -> Vec<String>;

    /// Rebuild a record from a split line.
    ///
    /// `fields` holds at least [`Self::FIELD_COUNT`] entries; anything past
    /// that count is ignored. Returns `None` for unparseable field values.
    fn decode(fields: &[&str]) -> Option<Self>;
}

impl WireRecord for Patient {
    const FIELD_COUNT: usize = 6;

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.age.to_string(),
            self.gender.clone(),
            self.address.clone(),
            self.phone.clone(),
        ]
    }

    fn decode(fields: &[&str]) -> Option<Self> {
        Some(Patient {
            id: fields.first()?.parse().ok()?,
            name: fields.get(1)?.to_string(),
            age: fields.get(2)?.parse().ok()?,
            gender: fields.get(3)?.to_string(),
            address: fields.get(4)?.to_string(),
            phone: fields.get(5)?.to_string(),
        })
    }
}

impl WireRecord for Doctor {
    const FIELD_COUNT: usize = 5;

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.age.to_string(),
            self.gender.clone(),
            self.specialty.clone(),
        ]
    }

    fn decode(fields: &[&str]) -> Option<Self> {
        Some(Doctor {
            id: fields.first()?.parse().ok()?,
            name: fields.get(1)?.to_string(),
            age: fields.get(2)?.parse().ok()?,
            gender: fields.get(3)?.to_string(),
            specialty: fields.get(4)?.to_string(),
        })
    }
}

impl WireRecord for Appointment {
    const FIELD_COUNT: usize = 6;

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.patient_id.to_string(),
            self.doctor_id.to_string(),
            self.datetime.clone(),
            self.reason.clone(),
            self.status.as_str().to_string(),
        ]
    }

    fn decode(fields: &[&str]) -> Option<Self> {
        Some(Appointment {
            id: fields.first()?.parse().ok()?,
            patient_id: fields.get(1)?.parse().ok()?,
            doctor_id: fields.get(2)?.parse().ok()?,
            datetime: fields.get(3)?.to_string(),
            reason: fields.get(4)?.to_string(),
            status: fields.get(5)?.parse().ok()?,
        })
    }
}

/// Encode one record as a separator-joined line (no trailing newline)
pub fn encode_record<R: WireRecord>(record: &R) -> String {
    record.fields().join(FIELD_SEPARATOR)
}

/// Encode a collection, one record per line, each line newline-terminated
pub fn encode_blob<'a, R: WireRecord + 'a>(records: impl IntoIterator<Item = &'a R>) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&encode_record(record));
        out.push('\n');
    }
    out
}

/// Decode a single line, or `None` when it is malformed
pub fn decode_record<R: WireRecord>(line: &str) -> Option<R> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < R::FIELD_COUNT {
        tracing::debug!(line, "dropping record line with too few fields");
        return None;
    }
    let record = R::decode(&fields);
    if record.is_none() {
        tracing::debug!(line, "dropping record line with unparseable fields");
    }
    record
}

/// Decode a full collection blob, skipping blank and malformed lines
pub fn decode_blob<R: WireRecord>(blob: &str) -> Vec<R> {
    blob.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(decode_record)
        .collect()
}
