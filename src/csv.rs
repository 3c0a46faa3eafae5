use std::{error::Error, path::Path};

use serde::de::DeserializeOwned;

/// Reads a CSV file from disk into a list of records
/// # Error
/// Errors if the file cannot be read or a row fails to deserialize
pub fn load<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<D>, Box<dyn Error>> {
    let data = std::fs::read(path)?;
    deserialize(&data)
}

/// Deserializes CSV-encoded bytes with a header row into a list of records.
/// Leading and trailing whitespace of every field is trimmed.
/// # Error
/// Errors on the first row that fails to deserialize
pub fn deserialize<D: DeserializeOwned>(data: &[u8]) -> Result<Vec<D>, Box<dyn Error>> {
    let rdr = ::csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(::csv::Trim::All)
        .from_reader(std::io::Cursor::new(data));
    rdr.into_deserialize::<D>()
        .map(|r| r.map_err(Box::<dyn Error>::from))
        .collect()
}

pub fn serialize(items: impl Iterator<Item = impl serde::Serialize>) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut wtr = ::csv::Writer::from_writer(vec![]);
    for item in items {
        wtr.serialize(item)?
    }
    Ok(wtr.into_inner()?)
}
