use crate::config::{IndexLayout, SeparatorPolicy};
use crate::decoder::ByteInput;
use crate::errors::{Error, Result, Section};
use crate::structs::tools::parse_unsigned;
use crate::tables::GROUP_COUNT;
use serde::{Deserialize, Serialize};

pub const SLOT_WIDTH: usize = 3;
pub const SLOTS_PER_LINE: usize = 40;

/// Element counts for every group, as read from the head of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTable {
    counts: Vec<u16>,
}

impl IndexTable {
    pub fn new(counts: Vec<u16>) -> Self {
        IndexTable { counts }
    }

    /// Bytes taken by an index in `layout`, separators included.
    pub fn encoded_len(layout: IndexLayout) -> usize {
        let slots = layout.slots();
        slots * SLOT_WIDTH + 2 * slots.div_ceil(SLOTS_PER_LINE)
    }

    pub fn parse(
        input: &mut ByteInput<'_>,
        layout: IndexLayout,
        separators: SeparatorPolicy,
    ) -> Result<Self> {
        let slots = layout.slots();
        let mut counts = Vec::with_capacity(slots);

        for slot in 0..slots {
            if slot != 0 && slot % SLOTS_PER_LINE == 0 {
                input.skip_separator(Section::Index, separators)?;
            }

            let offset = input.pointer();
            let raw = input.take(SLOT_WIDTH, Section::Index)?;
            let count = std::str::from_utf8(raw)
                .ok()
                .and_then(parse_unsigned)
                .and_then(|v| u16::try_from(v).ok())
                .ok_or_else(|| Error::MalformedIndex {
                    slot: slot + 1,
                    offset,
                    text: String::from_utf8_lossy(raw).into_owned(),
                })?;
            counts.push(count);
        }
        input.skip_separator(Section::Index, separators)?;

        Ok(IndexTable { counts })
    }

    pub fn slots(&self) -> usize {
        self.counts.len()
    }

    /// Element count of group `group` (1-based); zero for unknown slots.
    pub fn count(&self, group: u8) -> usize {
        match group {
            0 => 0,
            g => self.counts.get(g as usize - 1).copied().unwrap_or(0) as usize,
        }
    }

    pub fn counts(&self) -> &[u16] {
        &self.counts
    }

    /// Groups with at least one element, in file order.
    pub fn populated(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts
            .iter()
            .take(GROUP_COUNT)
            .enumerate()
            .filter(|(_, count)| **count != 0)
            .map(|(i, count)| (i as u8 + 1, *count as usize))
    }

    /// Slots past the last defined group.
    pub fn reserved(&self) -> &[u16] {
        self.counts.get(GROUP_COUNT..).unwrap_or(&[])
    }
}
