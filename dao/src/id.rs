use serde::{Deserialize, Serialize};

/// Record id shape: a prefix followed by a zero-padded sequence number,
/// e.g. `RFI-2025-003` or `EQ-0007`.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Debug)]
pub struct IdFormat {
    prefix: String,
    width: usize,
}

impl IdFormat {
    pub fn new(prefix: &str, width: &usize) -> Self {
        Self {
            prefix: prefix.to_owned(),
            width: *width,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn width(&self) -> &usize {
        &self.width
    }

    pub fn format(&self, sequence: &u64) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }

    /// Sequence number of `id` if it is the prefix followed by digits only.
    pub fn parse(&self, id: &str) -> Option<u64> {
        let suffix = id.strip_prefix(self.prefix.as_str())?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok()
    }

    /// Next id after the highest sequence among `ids`, starting at 1.
    pub fn next<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> String {
        let max = ids.into_iter().filter_map(|id| self.parse(id)).max();
        self.format(&max.map_or(1, |max| max.saturating_add(1)))
    }
}
