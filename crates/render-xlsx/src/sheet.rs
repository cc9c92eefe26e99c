use std::fmt;

/// Widest a column is auto-sized to, in characters.
pub const MAX_COLUMN_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Integer(i64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// `""` for a missing value.
    pub fn opt_text<S: AsRef<str>>(value: Option<S>) -> Self {
        CellValue::Text(value.map(|s| s.as_ref().to_string()).unwrap_or_default())
    }

    /// How many characters the cell shows, for column sizing.
    pub(crate) fn display_len(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            other => other.to_string().chars().count(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// One worksheet: an optional merged title row, a header row and data rows.
#[derive(Debug, Clone)]
pub struct SheetSpec {
    pub name: String,
    pub title: Option<String>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub right_to_left: bool,
    pub zebra: bool,
    pub freeze_header: bool,
}

impl SheetSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            header: Vec::new(),
            rows: Vec::new(),
            right_to_left: true,
            zebra: true,
            freeze_header: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn header<I, S>(mut self, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = header.into_iter().map(Into::into).collect();
        self
    }

    pub fn left_to_right(mut self) -> Self {
        self.right_to_left = false;
        self
    }

    pub fn zebra(mut self, zebra: bool) -> Self {
        self.zebra = zebra;
        self
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).chain(std::iter::once(self.header.len())).max().unwrap_or(0)
    }

    /// Row index of the header, after the title row if there is one.
    pub(crate) fn header_row(&self) -> u32 {
        u32::from(self.title.is_some())
    }

    /// `min(longest cell + 2, 50)` per column. The title row is merged and not counted.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0usize; self.column_count()];
        for (i, h) in self.header.iter().enumerate() {
            widths[i] = widths[i].max(h.chars().count());
        }
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.display_len());
            }
        }
        widths.into_iter().map(|w| (w + 2).min(MAX_COLUMN_WIDTH)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_content_and_cap() {
        let mut sheet = SheetSpec::new("s").header(["الاسم", "ملاحظات"]);
        sheet.push_row(vec!["علي".into(), CellValue::text("x".repeat(80))]);
        sheet.push_row(vec![CellValue::Integer(1234567), "".into()]);
        assert_eq!(sheet.column_widths(), vec![9, MAX_COLUMN_WIDTH]);
    }

    #[test]
    fn title_pushes_header_down() {
        let plain = SheetSpec::new("a");
        let titled = SheetSpec::new("b").title("الإحصائيات");
        assert_eq!(plain.header_row(), 0);
        assert_eq!(titled.header_row(), 1);
    }

    #[test]
    fn missing_text_is_empty() {
        assert_eq!(CellValue::opt_text(None::<&str>), CellValue::Text(String::new()));
        assert_eq!(CellValue::opt_text(Some("x")), CellValue::Text("x".into()));
    }
}
