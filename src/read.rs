use crate::data::{Error, Record};
use log::debug;
use std::path::Path;

/// Trait for doing something with a `Record` read from a CSV export.
/// The aggregator is the real user; tests plug in a plain collector to check
/// what comes out of the CSV stream.
pub(crate) trait RecordUser {
    fn use_record(&mut self, record: Record) -> Result<(), Error>;
}

/// Turns the raw bytes of an export into text. Banks hand these out as UTF-16
/// with a byte-order mark; anything without one is taken as UTF-8.
pub(crate) fn decode(bytes: &[u8]) -> Result<String, Error> {
    let utf16 = |bytes: &[u8], from: fn([u8; 2]) -> u16| {
        if bytes.len() % 2 != 0 {
            return Err(Error::Decoding);
        }
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| from([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|_| Error::Decoding)
    };
    match bytes {
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => {
            String::from_utf8(rest.to_vec()).map_err(|_| Error::Decoding)
        }
        _ => String::from_utf8(bytes.to_vec()).map_err(|_| Error::Decoding),
    }
}

/// Simple CSV importer for `Record`s. Stops at the first record the user refuses.
pub(crate) fn read_records<R: std::io::Read, U: RecordUser>(
    reader: R,
    user: &mut U,
) -> Result<usize, anyhow::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut count = 0;
    for result in rdr.deserialize() {
        let record: Record = result?;
        user.use_record(record)?;
        count += 1;
    }
    Ok(count)
}

/// Loads a whole export file. The file is read in one go and closed before any
/// record gets parsed.
pub(crate) fn read_file<U: RecordUser>(path: &Path, user: &mut U) -> Result<usize, anyhow::Error> {
    let bytes = std::fs::read(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    let text = decode(&bytes)?;
    read_records(text.as_bytes(), user)
}
