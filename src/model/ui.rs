//! UI state - config form, modals, notices and the section navigator

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use super::grid::MAX_DIMENSION;
use super::naming::{NamingType, SectionConfig};

/// How long a notice stays in the status bar
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

// ============================================================================
// Config form
// ============================================================================

/// Inputs of the sidebar config form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Rows,
    Cols,
    SectionCode,
    RowStart,
    ColStart,
    NamePattern,
    NamingType,
    InvertRows,
    InvertCols,
    ZeroPadding,
}

impl ConfigField {
    /// Order of the fields in the sidebar
    pub const ALL: [ConfigField; 10] = [
        ConfigField::SectionCode,
        ConfigField::Rows,
        ConfigField::Cols,
        ConfigField::NamingType,
        ConfigField::RowStart,
        ConfigField::ColStart,
        ConfigField::NamePattern,
        ConfigField::InvertRows,
        ConfigField::InvertCols,
        ConfigField::ZeroPadding,
    ];

    /// Text inputs accept typing; the rest are toggles
    pub fn is_text(self) -> bool {
        matches!(
            self,
            ConfigField::Rows
                | ConfigField::Cols
                | ConfigField::SectionCode
                | ConfigField::RowStart
                | ConfigField::ColStart
                | ConfigField::NamePattern
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfigField::Rows => "Rows",
            ConfigField::Cols => "Columns",
            ConfigField::SectionCode => "Section code",
            ConfigField::RowStart => "Row start",
            ConfigField::ColStart => "Column start",
            ConfigField::NamePattern => "Name pattern",
            ConfigField::NamingType => "Row naming",
            ConfigField::InvertRows => "Invert rows",
            ConfigField::InvertCols => "Invert columns",
            ConfigField::ZeroPadding => "Zero padding",
        }
    }

    /// Changing the grid size resizes; anything else only relabels
    pub fn is_dimension(self) -> bool {
        matches!(self, ConfigField::Rows | ConfigField::Cols)
    }
}

/// Raw contents of the config inputs, applied to the live section on change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigForm {
    pub rows: String,
    pub cols: String,
    pub section_code: String,
    pub row_start: String,
    pub col_start: String,
    pub name_pattern: String,
    pub naming_type: NamingType,
    pub invert_rows: bool,
    pub invert_cols: bool,
    pub zero_padding: bool,
    pub focused: Option<ConfigField>,
}

impl ConfigForm {
    /// Mirror the live section into the inputs
    pub fn from_section(rows: usize, cols: usize, code: &str, config: &SectionConfig) -> Self {
        Self {
            rows: rows.to_string(),
            cols: cols.to_string(),
            section_code: code.to_string(),
            row_start: config.row_start.clone(),
            col_start: config.col_start.clone(),
            name_pattern: config.name_pattern.clone(),
            naming_type: config.naming_type,
            invert_rows: config.invert_rows,
            invert_cols: config.invert_cols,
            zero_padding: config.zero_padding,
            focused: None,
        }
    }

    pub fn text(&self, field: ConfigField) -> Option<&str> {
        match field {
            ConfigField::Rows => Some(&self.rows),
            ConfigField::Cols => Some(&self.cols),
            ConfigField::SectionCode => Some(&self.section_code),
            ConfigField::RowStart => Some(&self.row_start),
            ConfigField::ColStart => Some(&self.col_start),
            ConfigField::NamePattern => Some(&self.name_pattern),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, field: ConfigField) -> Option<&mut String> {
        match field {
            ConfigField::Rows => Some(&mut self.rows),
            ConfigField::Cols => Some(&mut self.cols),
            ConfigField::SectionCode => Some(&mut self.section_code),
            ConfigField::RowStart => Some(&mut self.row_start),
            ConfigField::ColStart => Some(&mut self.col_start),
            ConfigField::NamePattern => Some(&mut self.name_pattern),
            _ => None,
        }
    }

    /// Flip a toggle field. Returns false for text fields.
    pub fn toggle(&mut self, field: ConfigField) -> bool {
        match field {
            ConfigField::NamingType => self.naming_type = self.naming_type.toggled(),
            ConfigField::InvertRows => self.invert_rows = !self.invert_rows,
            ConfigField::InvertCols => self.invert_cols = !self.invert_cols,
            ConfigField::ZeroPadding => self.zero_padding = !self.zero_padding,
            _ => return false,
        }
        true
    }

    pub fn is_on(&self, field: ConfigField) -> bool {
        match field {
            ConfigField::InvertRows => self.invert_rows,
            ConfigField::InvertCols => self.invert_cols,
            ConfigField::ZeroPadding => self.zero_padding,
            ConfigField::NamingType => self.naming_type == NamingType::Alpha,
            _ => false,
        }
    }

    /// Row count, falling back to `fallback` when not a positive integer
    pub fn parsed_rows(&self, fallback: usize) -> usize {
        parse_dimension(&self.rows, fallback)
    }

    pub fn parsed_cols(&self, fallback: usize) -> usize {
        parse_dimension(&self.cols, fallback)
    }

    /// Section code, or `fallback` when blank
    pub fn parsed_code(&self, fallback: &str) -> String {
        let code = self.section_code.trim();
        if code.is_empty() {
            fallback.to_string()
        } else {
            code.to_string()
        }
    }

    /// Naming config described by the inputs
    pub fn section_config(&self) -> SectionConfig {
        SectionConfig {
            naming_type: self.naming_type,
            row_start: self.row_start.clone(),
            col_start: self.col_start.clone(),
            invert_rows: self.invert_rows,
            invert_cols: self.invert_cols,
            zero_padding: self.zero_padding,
            name_pattern: self.name_pattern.clone(),
        }
        .normalized()
    }
}

fn parse_dimension(value: &str, fallback: usize) -> usize {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => n.min(MAX_DIMENSION),
        _ => fallback,
    }
}

// ============================================================================
// Modals
// ============================================================================

/// Currently open dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Edit the label of the data cell at `index`
    EditSeat { index: usize, input: String },
    /// Edit the override label of `row`
    EditRow { row: usize, input: String },
    /// Confirm dropping the loaded project
    ConfirmCloseProject,
}

impl Modal {
    pub fn title(&self) -> String {
        match self {
            Modal::EditSeat { .. } => "Edit seat".to_string(),
            Modal::EditRow { row, .. } => format!("Edit row {}", row),
            Modal::ConfirmCloseProject => "Close project?".to_string(),
        }
    }

    pub fn input(&self) -> Option<&str> {
        match self {
            Modal::EditSeat { input, .. } | Modal::EditRow { input, .. } => Some(input),
            Modal::ConfirmCloseProject => None,
        }
    }

    pub fn input_mut(&mut self) -> Option<&mut String> {
        match self {
            Modal::EditSeat { input, .. } | Modal::EditRow { input, .. } => Some(input),
            Modal::ConfirmCloseProject => None,
        }
    }
}

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Status bar message with auto-expiry
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

impl Notice {
    pub fn new(text: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            text: text.into(),
            level,
            expires_at: Instant::now() + NOTICE_DURATION,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, NoticeLevel::Info)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, NoticeLevel::Error)
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// ============================================================================
// UiState
// ============================================================================

#[derive(Debug, Clone)]
pub struct UiState {
    pub form: ConfigForm,
    pub modal: Option<Modal>,
    pub notice: Option<Notice>,
    /// Parents the user expanded in the section navigator (`node_<code>`)
    pub expanded_nodes: BTreeSet<String>,
    /// First visible row of the section navigator
    pub tree_scroll: usize,
}

impl UiState {
    pub fn new(form: ConfigForm) -> Self {
        Self {
            form,
            modal: None,
            notice: None,
            expanded_nodes: BTreeSet::new(),
            tree_scroll: 0,
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!("{}", notice.text),
            NoticeLevel::Error => tracing::warn!("{}", notice.text),
        }
        self.notice = Some(notice);
    }

    /// Drop an expired notice. Returns true if one was removed.
    pub fn expire_notice(&mut self) -> bool {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
            return true;
        }
        false
    }
}
