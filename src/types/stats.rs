//! Stat record types written to the output document

use serde::{Deserialize, Serialize};

/// Placeholder for a rank the service did not report
pub const UNKNOWN_RANK: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TryHackMeStats {
    /// "Top N%" or "N/A"
    pub rank: String,
    pub badges: u64,
    pub rooms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HackTheBoxStats {
    pub rank: String,
    /// User owns plus system owns
    pub owns: u64,
    pub solves: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeetCodeStats {
    pub solved: u64,
    /// Global ranking with thousand separators (e.g., "12,345")
    pub rank: String,
}

/// Personal bests as displayed on the profile page, not parsed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonkeytypeStats {
    pub wpm_15s: String,
    pub wpm_60s: String,
}

/// One run's worth of stats, keyed by service.
///
/// Field order is the key order of the written document. A `None` entry
/// serializes as `null` so all four keys are present on every run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub tryhackme: Option<TryHackMeStats>,
    pub hackthebox: Option<HackTheBoxStats>,
    pub leetcode: Option<LeetCodeStats>,
    pub monkeytype: Option<MonkeytypeStats>,
}

impl Stats {
    /// Number of services that produced a record
    pub fn fetched_count(&self) -> usize {
        [
            self.tryhackme.is_some(),
            self.hackthebox.is_some(),
            self.leetcode.is_some(),
            self.monkeytype.is_some(),
        ]
        .into_iter()
        .filter(|&fetched| fetched)
        .count()
    }
}

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}
