use serde::{Deserialize, Serialize};

/// Number of slots in the element-count index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexLayout {
    /// Two lines of 40 counts, slots 61..80 reserved.
    #[default]
    Sao4,
    /// One line of 40 and one of 20 counts.
    Compact,
}

impl IndexLayout {
    pub fn slots(self) -> usize {
        match self {
            IndexLayout::Sao4 => 80,
            IndexLayout::Compact => 60,
        }
    }
}

/// How separator bytes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorPolicy {
    /// Only the length is enforced.
    #[default]
    Length,
    /// Separators must be CR LF.
    Strict,
}

/// What to do when a group the decoder has no layout for reports elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnusedGroupPolicy {
    #[default]
    Reject,
    /// Step over the group using its nominal width and drop the content.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub index_layout: IndexLayout,
    pub separators: SeparatorPolicy,
    pub unused_groups: UnusedGroupPolicy,
}

impl DecodeOptions {
    pub fn with_index_layout(mut self, layout: IndexLayout) -> Self {
        self.index_layout = layout;
        self
    }

    pub fn with_separators(mut self, policy: SeparatorPolicy) -> Self {
        self.separators = policy;
        self
    }

    pub fn with_unused_groups(mut self, policy: UnusedGroupPolicy) -> Self {
        self.unused_groups = policy;
        self
    }
}
