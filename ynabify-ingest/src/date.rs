//! Template-driven date reassembly.
//!
//! A template such as `YYYYMMDD` or `DD-MM-YYYY` says, position by position,
//! which raw character belongs to the year, month or day. The digits are
//! bucketed and re-joined as `YYYY-MM-DD`. No calendar validation happens here.

use anyhow::{bail, Result};

/// Output arrangement; a template equal to this passes dates through untouched.
pub const CANONICAL_DATE_TEMPLATE: &str = "YYYY-MM-DD";

/// What ABN AMRO exports use.
pub const DEFAULT_DATE_TEMPLATE: &str = "YYYYMMDD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTemplate {
    pattern: String,
}

impl DateTemplate {
    /// Accepts any template that names at least one year, month and day position.
    pub fn parse(pattern: &str) -> Result<Self> {
        for marker in ['Y', 'M', 'D'] {
            if !pattern.contains(marker) {
                bail!("date template '{pattern}' has no '{marker}' position");
            }
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    pub fn reformat(&self, raw: &str) -> String {
        if self.pattern == CANONICAL_DATE_TEMPLATE {
            return raw.to_string();
        }

        let raw: Vec<char> = raw.chars().collect();
        let mut year = String::new();
        let mut month = String::new();
        let mut day = String::new();

        for (index, marker) in self.pattern.chars().enumerate() {
            // Raw text shorter than the template just leaves the bucket short.
            let Some(&ch) = raw.get(index) else {
                continue;
            };
            match marker {
                'Y' => year.push(ch),
                'M' => month.push(ch),
                'D' => day.push(ch),
                _ => {}
            }
        }

        format!("{year}-{month}-{day}")
    }
}

impl Default for DateTemplate {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_TEMPLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_template() {
        let t = DateTemplate::default();
        assert_eq!(t.reformat("20240301"), "2024-03-01");
        assert_eq!(t.reformat("19991231"), "1999-12-31");
    }

    #[test]
    fn test_european_template() {
        let t = DateTemplate::parse("DD-MM-YYYY").unwrap();
        assert_eq!(t.reformat("01-03-2024"), "2024-03-01");
    }

    #[test]
    fn test_canonical_passes_through() {
        let t = DateTemplate::parse(CANONICAL_DATE_TEMPLATE).unwrap();
        assert_eq!(t.reformat("2024-03-01"), "2024-03-01");
        assert_eq!(t.reformat("anything"), "anything");
    }

    #[test]
    fn test_no_calendar_validation() {
        let t = DateTemplate::default();
        assert_eq!(t.reformat("20241399"), "2024-13-99");
    }

    #[test]
    fn test_short_raw_text() {
        let t = DateTemplate::default();
        assert_eq!(t.reformat("2024"), "2024--");
        assert_eq!(t.reformat(""), "--");
    }

    #[test]
    fn test_rejects_template_without_markers() {
        assert!(DateTemplate::parse("YYYYMM").is_err());
        assert!(DateTemplate::parse("").is_err());
    }
}
