use crate::structs::{IndexTable, SounderSettings};
use crate::tables::{GROUP_COUNT, GROUPS, GroupKind};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Decoded content of one group slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GroupData {
    Absent,
    Numeric(Vec<f64>),
    Text(Vec<String>),
    Settings(SounderSettings),
}

impl GroupData {
    pub fn is_absent(&self) -> bool {
        matches!(self, GroupData::Absent)
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            GroupData::Numeric(values) => Some(values),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GroupData::Absent => 0,
            GroupData::Numeric(values) => values.len(),
            GroupData::Text(lines) => lines.len(),
            GroupData::Settings(settings) => settings.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One ionogram: its index and every group it declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SAORecord {
    source: String,
    offset: usize,
    length: usize,
    index: IndexTable,
    groups: Vec<GroupData>,
}

impl SAORecord {
    pub(crate) fn new(
        source: &str,
        offset: usize,
        length: usize,
        index: IndexTable,
        groups: Vec<GroupData>,
    ) -> Self {
        debug_assert_eq!(groups.len(), GROUP_COUNT);
        SAORecord {
            source: source.to_string(),
            offset,
            length,
            index,
            groups,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Position of the record's first byte in its input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes the record occupies, separators included.
    pub fn encoded_len(&self) -> usize {
        self.length
    }

    pub fn index(&self) -> &IndexTable {
        &self.index
    }

    pub fn group(&self, id: u8) -> Option<&GroupData> {
        match id {
            0 => None,
            id => self.groups.get(id as usize - 1),
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = (u8, &GroupData)> {
        self.groups.iter().enumerate().map(|(i, g)| (i as u8 + 1, g))
    }

    /// Values of a numeric group; empty when the group is absent.
    pub fn numeric_group(&self, id: u8) -> &[f64] {
        self.group(id).and_then(GroupData::as_numeric).unwrap_or(&[])
    }

    pub fn description(&self) -> &[String] {
        match self.group(2) {
            Some(GroupData::Text(lines)) => lines,
            _ => &[],
        }
    }

    pub fn settings(&self) -> Option<&SounderSettings> {
        match self.group(3) {
            Some(GroupData::Settings(settings)) => Some(settings),
            _ => None,
        }
    }

    /// Time stamp of the ionogram. `None` both without group 3 and when its
    /// fields do not form a calendar time; `settings()` then
    /// `SounderSettings::timestamp` reports which field is wrong.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.settings().and_then(|s| s.timestamp().ok())
    }
}

impl Display for SAORecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAO record from {} @ {}", self.source, self.offset)?;
        writeln!(f, "  Length: {} bytes", self.length)?;

        if let Some(settings) = self.settings() {
            match settings.timestamp() {
                Ok(ts) => writeln!(f, "  Time:    {}", ts)?,
                Err(_) => writeln!(f, "  Time:    invalid")?,
            }
            if let Ok(station) = settings.receiver_station() {
                writeln!(f, "  Station: {}", station)?;
            }
        }
        for line in self.description() {
            writeln!(f, "  {}", line)?;
        }

        writeln!(f)?;
        writeln!(f, "  Groups:")?;
        for (spec, data) in GROUPS.iter().zip(&self.groups) {
            if data.is_absent() {
                continue;
            }
            let kind = match spec.kind {
                GroupKind::Numeric => "values",
                GroupKind::Text => "lines",
                GroupKind::Settings => "bytes",
                GroupKind::Unused => "",
            };
            writeln!(
                f,
                "    {:>2} {:<48} {:>4} {}",
                spec.id,
                spec.title,
                data.len(),
                kind
            )?;
        }
        Ok(())
    }
}

/// All records decoded from one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SAOFile {
    source: String,
    records: Vec<SAORecord>,
}

impl SAOFile {
    pub fn new(source: &str) -> Self {
        SAOFile {
            source: source.to_string(),
            records: Vec::new(),
        }
    }

    pub(crate) fn push_record(&mut self, record: SAORecord) {
        self.records.push(record);
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn record_at(&self, index: usize) -> Option<&SAORecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[SAORecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SAORecord> {
        self.records
    }
}
