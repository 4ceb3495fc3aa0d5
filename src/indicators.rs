//! Suspicious phrase scan over raw posting text

use serde::Serialize;

/// Fraud phrases and their risk weight (0-100)
pub const SUSPICIOUS_PATTERNS: &[(&str, u8)] = &[
    ("wire transfer", 95),
    ("no interview", 90),
    ("quick cash", 88),
    ("work from home", 45),
    ("immediate start", 60),
    ("no experience", 55),
    ("bank account", 85),
    ("personal information", 75),
    ("upfront payment", 92),
    ("guaranteed income", 80),
    ("data entry", 40),
    ("confidential", 35),
];

/// Maximum number of indicators reported
pub const MAX_INDICATORS: usize = 6;

/// One suspicious phrase found in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub keyword: &'static str,
    pub count: usize,
    pub risk: u8,
}

/// Case-insensitive phrase counts, highest risk first, at most `MAX_INDICATORS`
pub fn detect(text: &str) -> Vec<Indicator> {
    let lower = text.to_lowercase();

    let mut found: Vec<Indicator> = SUSPICIOUS_PATTERNS
        .iter()
        .filter_map(|&(keyword, risk)| {
            let count = lower.matches(keyword).count();
            (count > 0).then_some(Indicator {
                keyword,
                count,
                risk,
            })
        })
        .collect();

    found.sort_by(|a, b| b.risk.cmp(&a.risk));
    found.truncate(MAX_INDICATORS);
    found
}
