//! Row/column naming rules and seat code generation
//!
//! A section's [`SectionConfig`] decides how rows and columns are labelled
//! (numeric or alphabetic rows, start values, inversion, zero padding) and the
//! template that turns a row/column pair into a seat code. Individual rows can
//! be renamed through [`RowOverrides`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default seat code template
pub const DEFAULT_NAME_PATTERN: &str = "$ROW-$COL";
/// Placeholder replaced by the row label
pub const ROW_PLACEHOLDER: &str = "$ROW";
/// Placeholder replaced by the column label
pub const COL_PLACEHOLDER: &str = "$COL";
/// Largest magnitude accepted for a numeric start value
pub const MAX_START: i64 = 1_000_000_000;

/// How rows are labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingType {
    /// 1, 2, 3, ...
    #[default]
    Numeric,
    /// A, B, ..., Z, AA, AB, ...
    Alpha,
}

impl NamingType {
    /// The other naming type (used by the toggle in the config panel)
    pub fn toggled(self) -> Self {
        match self {
            NamingType::Numeric => NamingType::Alpha,
            NamingType::Alpha => NamingType::Numeric,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NamingType::Numeric => "Numeric",
            NamingType::Alpha => "Alphabetic",
        }
    }
}

/// Naming parameters for one section
///
/// Field names follow the keys the stadium tooling has always stored
/// (`rowStart`, `namePattern`, ...) so existing project files load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionConfig {
    /// First row value: a number for numeric naming, letters for alpha naming
    pub row_start: String,
    /// First column number
    pub col_start: String,
    pub naming_type: NamingType,
    pub invert_rows: bool,
    pub invert_cols: bool,
    /// Seat code template with `$ROW` and `$COL` placeholders
    pub name_pattern: String,
    pub zero_padding: bool,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            row_start: "1".to_string(),
            col_start: "1".to_string(),
            naming_type: NamingType::Numeric,
            invert_rows: false,
            invert_cols: false,
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
            zero_padding: false,
        }
    }
}

impl SectionConfig {
    /// Replace blank values with their defaults
    pub fn normalized(mut self) -> Self {
        if self.row_start.trim().is_empty() {
            self.row_start = "1".to_string();
        }
        if self.col_start.trim().is_empty() {
            self.col_start = "1".to_string();
        }
        if self.name_pattern.is_empty() {
            self.name_pattern = DEFAULT_NAME_PATTERN.to_string();
        }
        self
    }
}

/// Sparse per-row label overrides, keyed by 1-based row index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowOverrides(BTreeMap<usize, String>);

impl RowOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.0.get(&row).map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Set or remove the override for `row`.
    ///
    /// The label is trimmed; an empty label removes the override.
    pub fn set(&mut self, row: usize, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            self.0.remove(&row);
        } else {
            self.0.insert(row, label.to_string());
        }
    }

    pub fn remove(&mut self, row: usize) {
        self.0.remove(&row);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(row, label)| (*row, label.as_str()))
    }
}

/// Label generator bound to one section's config, overrides and dimensions
#[derive(Debug, Clone, Copy)]
pub struct Naming<'a> {
    pub config: &'a SectionConfig,
    pub overrides: &'a RowOverrides,
    pub rows: usize,
    pub cols: usize,
}

impl<'a> Naming<'a> {
    pub fn new(
        config: &'a SectionConfig,
        overrides: &'a RowOverrides,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            config,
            overrides,
            rows,
            cols,
        }
    }

    /// Label shown in the row label column for 1-based `row`
    pub fn row_label(&self, row: usize) -> String {
        if let Some(label) = self.overrides.get(row) {
            return label.to_string();
        }

        let logical = logical_index(row, self.rows, self.config.invert_rows);
        match self.config.naming_type {
            NamingType::Alpha => alpha_label(logical, &self.config.row_start),
            NamingType::Numeric => {
                let start = parse_start(&self.config.row_start);
                offset(start, logical).to_string()
            }
        }
    }

    /// Label shown in the header row for 1-based `col`
    pub fn column_label(&self, col: usize) -> String {
        let start = parse_start(&self.config.col_start);
        let logical = logical_index(col, self.cols, self.config.invert_cols);
        let value = offset(start, logical).to_string();

        if !self.config.zero_padding {
            return value;
        }

        let max_value = offset(start, self.cols);
        let width = if max_value >= 1000 {
            4
        } else if max_value >= 100 {
            3
        } else {
            2
        };
        format!("{:0>width$}", value, width = width)
    }

    /// Seat code for the cell at (`row`, `col`) built from the name pattern
    pub fn seat_code(&self, row: usize, col: usize) -> String {
        self.config
            .name_pattern
            .replacen(ROW_PLACEHOLDER, &self.row_label(row), 1)
            .replacen(COL_PLACEHOLDER, &self.column_label(col), 1)
    }
}

fn logical_index(index: usize, count: usize, inverted: bool) -> usize {
    if inverted {
        (count + 1).saturating_sub(index).max(1)
    } else {
        index
    }
}

/// Label value `logical - 1` steps past `start`
fn offset(start: i64, logical: usize) -> i64 {
    let steps = i64::try_from(logical).unwrap_or(i64::MAX);
    start.saturating_add(steps).saturating_sub(1)
}

/// Parse a start value the way the naming inputs always have: leading integer,
/// with anything unparsable or zero falling back to 1. Clamped to
/// `±MAX_START`.
fn parse_start(value: &str) -> i64 {
    match parse_leading_int(value) {
        Some(n) if n != 0 => n.clamp(-MAX_START, MAX_START),
        _ => 1,
    }
}

/// Parse the leading integer of `value`, ignoring leading whitespace and any
/// trailing garbage (`"12abc"` → 12). Returns `None` when no digits lead.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Overlong digit runs saturate instead of failing
    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Bijective base-26 value of a letter sequence (`A` = 1, `Z` = 26, `AA` = 27).
///
/// Lowercase letters are uppercased; any other character counts as `A`.
/// An empty start is treated as `A`.
fn alpha_value(start: &str) -> u64 {
    let mut value: u64 = 0;
    let mut seen = false;
    for ch in start.chars() {
        let upper = ch.to_ascii_uppercase();
        let digit = if upper.is_ascii_uppercase() {
            upper as u64 - 'A' as u64 + 1
        } else {
            1
        };
        value = value.saturating_mul(26).saturating_add(digit);
        seen = true;
    }
    if seen {
        value
    } else {
        1
    }
}

/// Letters for a bijective base-26 value; zero renders as `A`
fn alpha_string(mut value: u64) -> String {
    let mut letters = Vec::new();
    while value > 0 {
        let m = (value - 1) % 26;
        letters.push((b'A' + m as u8) as char);
        value = (value - m) / 26;
    }
    if letters.is_empty() {
        return "A".to_string();
    }
    letters.iter().rev().collect()
}

/// Alphabetic row label: `start` advanced by `logical - 1` letters
pub fn alpha_label(logical: usize, start: &str) -> String {
    let value = alpha_value(start).saturating_add(logical as u64).saturating_sub(1);
    alpha_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naming(config: &SectionConfig, rows: usize, cols: usize) -> String {
        let overrides = RowOverrides::new();
        Naming::new(config, &overrides, rows, cols).seat_code(1, 1)
    }

    #[test]
    fn test_numeric_labels_default() {
        let config = SectionConfig::default();
        let overrides = RowOverrides::new();
        let n = Naming::new(&config, &overrides, 10, 15);
        assert_eq!(n.row_label(1), "1");
        assert_eq!(n.row_label(10), "10");
        assert_eq!(n.column_label(3), "3");
        assert_eq!(n.seat_code(2, 7), "2-7");
    }

    #[test]
    fn test_numeric_start_offsets() {
        let config = SectionConfig {
            row_start: "5".into(),
            col_start: "101".into(),
            ..Default::default()
        };
        let overrides = RowOverrides::new();
        let n = Naming::new(&config, &overrides, 3, 3);
        assert_eq!(n.row_label(1), "5");
        assert_eq!(n.row_label(3), "7");
        assert_eq!(n.column_label(2), "102");
    }

    #[test]
    fn test_unparsable_or_zero_start_falls_back_to_one() {
        let config = SectionConfig {
            row_start: "abc".into(),
            col_start: "0".into(),
            ..Default::default()
        };
        assert_eq!(naming(&config, 2, 2), "1-1");
    }

    #[test]
    fn test_inverted_rows_and_cols() {
        let config = SectionConfig {
            invert_rows: true,
            invert_cols: true,
            ..Default::default()
        };
        let overrides = RowOverrides::new();
        let n = Naming::new(&config, &overrides, 4, 6);
        assert_eq!(n.row_label(1), "4");
        assert_eq!(n.row_label(4), "1");
        assert_eq!(n.column_label(1), "6");
        assert_eq!(n.column_label(6), "1");
    }

    #[test]
    fn test_alpha_labels() {
        assert_eq!(alpha_label(1, "A"), "A");
        assert_eq!(alpha_label(26, "A"), "Z");
        assert_eq!(alpha_label(27, "A"), "AA");
        assert_eq!(alpha_label(2, "Z"), "AA");
        assert_eq!(alpha_label(1, "c"), "C");
        assert_eq!(alpha_label(1, ""), "A");
        assert_eq!(alpha_label(3, "1"), "C");
    }

    #[test]
    fn test_alpha_row_naming() {
        let config = SectionConfig {
            naming_type: NamingType::Alpha,
            row_start: "B".into(),
            ..Default::default()
        };
        let overrides = RowOverrides::new();
        let n = Naming::new(&config, &overrides, 3, 3);
        assert_eq!(n.row_label(1), "B");
        assert_eq!(n.row_label(3), "D");
        assert_eq!(n.seat_code(3, 2), "D-2");
    }

    #[test]
    fn test_zero_padding_width_follows_max_column() {
        let mut config = SectionConfig {
            zero_padding: true,
            ..Default::default()
        };
        let overrides = RowOverrides::new();
        assert_eq!(Naming::new(&config, &overrides, 1, 15).column_label(3), "03");
        assert_eq!(Naming::new(&config, &overrides, 1, 120).column_label(3), "003");

        config.col_start = "995".into();
        assert_eq!(Naming::new(&config, &overrides, 1, 10).column_label(1), "0995");
    }

    #[test]
    fn test_row_override_wins_and_feeds_seat_code() {
        let config = SectionConfig::default();
        let mut overrides = RowOverrides::new();
        overrides.set(2, "  VIP ");
        let n = Naming::new(&config, &overrides, 3, 3);
        assert_eq!(n.row_label(2), "VIP");
        assert_eq!(n.seat_code(2, 1), "VIP-1");

        overrides.set(2, "   ");
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_pattern_replaces_first_placeholder_only() {
        let config = SectionConfig {
            name_pattern: "S$ROW/$COL/$ROW".into(),
            ..Default::default()
        };
        assert_eq!(naming(&config, 1, 1), "S1/1/$ROW");
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  7x"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("x7"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_huge_start_values_are_clamped() {
        let config = SectionConfig {
            row_start: "9223372036854775807".into(),
            col_start: "9223372036854775807".into(),
            zero_padding: true,
            ..Default::default()
        };
        let overrides = RowOverrides::new();
        let n = Naming::new(&config, &overrides, 3, 3);
        assert_eq!(n.row_label(2), (MAX_START + 1).to_string());
        assert_eq!(n.column_label(3), (MAX_START + 2).to_string());
        assert_eq!(n.seat_code(1, 1), format!("{MAX_START}-{MAX_START}"));

        let config = SectionConfig {
            row_start: "-99999999999999999999999".into(),
            ..Default::default()
        };
        let n = Naming::new(&config, &overrides, 3, 3);
        assert_eq!(n.row_label(1), (-MAX_START).to_string());
    }

    #[test]
    fn test_config_normalized_fills_blanks() {
        let config = SectionConfig {
            row_start: "".into(),
            col_start: " ".into(),
            name_pattern: "".into(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(config, SectionConfig::default());
    }

    #[test]
    fn test_config_deserializes_stored_keys() {
        let json = r#"{"rowStart":"A","colStart":"3","namingType":"alpha","invertRows":true,"invertCols":false,"namePattern":"$ROW$COL","zeroPadding":true}"#;
        let config: SectionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.naming_type, NamingType::Alpha);
        assert_eq!(config.row_start, "A");
        assert!(config.invert_rows);
        assert!(config.zero_padding);
    }

    #[test]
    fn test_row_overrides_roundtrip_string_keys() {
        let overrides: RowOverrides = serde_json::from_str(r#"{"3":"VIP"}"#).unwrap();
        assert_eq!(overrides.get(3), Some("VIP"));
    }
}
