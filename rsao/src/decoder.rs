use crate::{
    config::{DecodeOptions, SeparatorPolicy, UnusedGroupPolicy},
    errors::{Error, Result, Section},
    record::{GroupData, SAOFile, SAORecord},
    structs::{IndexTable, SounderSettings, tools::parse_element},
    tables::{GROUPS, GroupKind, GroupSpec},
};
use encoding_rs::WINDOWS_1252;
use log::{debug, trace, warn};

pub const SEPARATOR: &[u8; 2] = b"\r\n";
pub const SEPARATOR_LEN: usize = 2;

/// Forward-only reader over a decoded buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteInput<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteInput<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteInput { data, pos: 0 }
    }

    pub fn pointer(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    pub fn take(&mut self, n: usize, section: Section) -> Result<&'a [u8]> {
        let available = self.data.len() - self.pos;
        if available < n {
            return Err(Error::Truncated {
                section,
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn skip_separator(&mut self, section: Section, policy: SeparatorPolicy) -> Result<()> {
        let offset = self.pos;
        let found = self.take(SEPARATOR_LEN, section)?;
        if policy == SeparatorPolicy::Strict && found != SEPARATOR {
            return Err(Error::SeparatorMismatch {
                section,
                offset,
                found: [found[0], found[1]],
            });
        }
        Ok(())
    }

    /// Skips line padding between records. Returns `true` when nothing but
    /// padding is left.
    fn skip_padding(&mut self) -> bool {
        let rest = self.remaining();
        if rest.iter().all(|b| is_padding(*b) || *b == b' ') {
            self.pos = self.data.len();
            return true;
        }
        let skipped = rest.iter().take_while(|b| is_padding(**b)).count();
        self.pos += skipped;
        false
    }
}

fn is_padding(b: u8) -> bool {
    matches!(b, b'\r' | b'\n' | 0x00 | 0x1A)
}

/// Walks the elements of one group: `count` fields of `spec.width` bytes with
/// a separator every `wrap_count` fields and one after the last.
fn walk_elements<'a, T>(
    spec: &GroupSpec,
    count: usize,
    input: &mut ByteInput<'a>,
    separators: SeparatorPolicy,
    mut element: impl FnMut(&'a [u8], usize, usize) -> Result<T>,
) -> Result<Vec<T>> {
    let section = Section::Group(spec.id);
    let wrap = spec.wrap_count();
    let mut values = Vec::with_capacity(count);

    for i in 0..count {
        if i != 0 && i % wrap == 0 {
            input.skip_separator(section, separators)?;
        }
        let offset = input.pointer();
        let raw = input.take(spec.width, section)?;
        values.push(element(raw, i, offset)?);
    }

    if count > 0 {
        input.skip_separator(section, separators)?;
    }

    Ok(values)
}

pub fn decode_numeric(
    spec: &GroupSpec,
    count: usize,
    input: &mut ByteInput<'_>,
    separators: SeparatorPolicy,
) -> Result<Vec<f64>> {
    walk_elements(spec, count, input, separators, |raw, i, offset| {
        parse_element(raw).ok_or_else(|| Error::MalformedField {
            group: spec.id,
            element: i,
            offset,
            text: String::from_utf8_lossy(raw).into_owned(),
        })
    })
}

pub fn decode_text(
    spec: &GroupSpec,
    count: usize,
    input: &mut ByteInput<'_>,
    separators: SeparatorPolicy,
) -> Result<Vec<String>> {
    walk_elements(spec, count, input, separators, |raw, _, _| {
        let (text, _) = WINDOWS_1252.decode_without_bom_handling(raw);
        Ok(text.trim_end().to_string())
    })
}

pub fn decode_settings(
    count: usize,
    input: &mut ByteInput<'_>,
    separators: SeparatorPolicy,
) -> Result<Option<SounderSettings>> {
    if count == 0 {
        return Ok(None);
    }
    let section = Section::Group(3);
    let offset = input.pointer();
    let block = input.take(count, section)?;
    let settings = SounderSettings::parse(block, offset)?;
    input.skip_separator(section, separators)?;
    Ok(Some(settings))
}

/// Decodes SAO records with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Decoder { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes the first record of `bytes`.
    pub fn decode(&self, bytes: &[u8], source: &str) -> Result<SAORecord> {
        let mut input = ByteInput::new(bytes);
        let record = self.decode_record(&mut input, source)?;

        if !input.skip_padding() {
            warn!(
                "{}: {} bytes after the first record were not decoded",
                source,
                input.remaining().len()
            );
        }

        Ok(record)
    }

    /// Decodes every record in `bytes`, back to back.
    pub fn decode_all(&self, bytes: &[u8], source: &str) -> Result<SAOFile> {
        let mut input = ByteInput::new(bytes);
        let mut file = SAOFile::new(source);

        loop {
            let record = self.decode_record(&mut input, source)?;
            file.push_record(record);
            if input.skip_padding() {
                break;
            }
        }

        debug!("{}: decoded {} records", source, file.record_count());
        Ok(file)
    }

    pub fn decode_record(&self, input: &mut ByteInput<'_>, source: &str) -> Result<SAORecord> {
        let start = input.pointer();
        let index = IndexTable::parse(input, self.options.index_layout, self.options.separators)?;

        for (i, count) in index.reserved().iter().enumerate() {
            if *count != 0 {
                warn!(
                    "{}: reserved index slot {} holds {}, ignored",
                    source,
                    GROUPS.len() + i + 1,
                    count
                );
            }
        }

        let mut groups = Vec::with_capacity(GROUPS.len());
        for spec in GROUPS.iter() {
            let count = index.count(spec.id);
            let offset = input.pointer();
            let data = self.decode_group(spec, count, input)?;
            if count != 0 {
                debug!(
                    "{}: group {} ({}) {} elements, bytes {}..{}",
                    source,
                    spec.id,
                    spec.name,
                    count,
                    offset,
                    input.pointer()
                );
            }
            groups.push(data);
        }

        trace!("{}: record at {} is {} bytes", source, start, input.pointer() - start);
        Ok(SAORecord::new(
            source,
            start,
            input.pointer() - start,
            index,
            groups,
        ))
    }

    fn decode_group(
        &self,
        spec: &GroupSpec,
        count: usize,
        input: &mut ByteInput<'_>,
    ) -> Result<GroupData> {
        if count == 0 {
            return Ok(GroupData::Absent);
        }
        let separators = self.options.separators;

        match spec.kind {
            GroupKind::Numeric => {
                decode_numeric(spec, count, input, separators).map(GroupData::Numeric)
            }
            GroupKind::Text => decode_text(spec, count, input, separators).map(GroupData::Text),
            GroupKind::Settings => Ok(decode_settings(count, input, separators)?
                .map(GroupData::Settings)
                .unwrap_or(GroupData::Absent)),
            GroupKind::Unused => match self.options.unused_groups {
                UnusedGroupPolicy::Reject => Err(Error::UnexpectedGroup {
                    group: spec.id,
                    count,
                    offset: input.pointer(),
                }),
                UnusedGroupPolicy::Skip => {
                    warn!(
                        "skipping {} elements of group {} ({})",
                        count, spec.id, spec.name
                    );
                    walk_elements(spec, count, input, separators, |_, _, _| Ok(()))?;
                    Ok(GroupData::Absent)
                }
            },
        }
    }
}
