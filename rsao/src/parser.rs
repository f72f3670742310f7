use crate::config::DecodeOptions;
use crate::decoder::Decoder;
use crate::errors::Result;
use crate::record::SAOFile;
use flate2::read::GzDecoder;
use log::debug;
use std::{
    borrow::Cow,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

pub fn parse_file<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<SAOFile> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut bytes = vec![];
    reader.read_to_end(&mut bytes)?;

    parse_bytes(&bytes, &path.display().to_string(), options)
}

/// Decodes every record in `bytes`, inflating gzip input first.
pub fn parse_bytes(bytes: &[u8], source: &str, options: &DecodeOptions) -> Result<SAOFile> {
    let bytes = inflate(bytes)?;
    Decoder::new(*options).decode_all(&bytes, source)
}

fn inflate(bytes: &[u8]) -> Result<Cow<'_, [u8]>> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut gz_decoder = GzDecoder::new(bytes);
        let mut inflated = vec![];
        gz_decoder.read_to_end(&mut inflated)?;
        debug!("inflated {} -> {} bytes", bytes.len(), inflated.len());
        Ok(Cow::Owned(inflated))
    } else {
        Ok(Cow::Borrowed(bytes))
    }
}
