//! In-memory record table.
//!
//! A `RecordSet` is one sheet's worth of data: an ordered header row plus
//! ordered data rows. Row order is significant (inheritance fill walks rows
//! top to bottom, and match ties resolve to the earliest reference row), so
//! rows live in a `Vec` and every operation preserves their order.

/// An ordered table of string cells under a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a data row, padded to the header width.
    ///
    /// Rows wider than the header are truncated; the readers reject such
    /// rows before they get here, so truncation only ever drops cells a
    /// caller constructed past the header on purpose.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Case-insensitive, whitespace-trimmed header lookup.
    ///
    /// PIM exports are inconsistent about header casing ("Unique ID" vs
    /// "unique id"), so all column resolution goes through here.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let want = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == want)
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: String) {
        if let Some(r) = self.rows.get_mut(row) {
            if let Some(c) = r.get_mut(col) {
                *c = value;
            }
        }
    }

    /// Append a column with the given header, one value per existing row.
    /// Missing values pad with empty strings.
    pub fn push_column(&mut self, header: &str, values: Vec<String>) {
        self.headers.push(header.to_string());
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.push(values.next().unwrap_or_default());
        }
    }

    /// Header names present in both tables, in self's column order.
    pub fn shared_columns(&self, other: &RecordSet) -> Vec<String> {
        self.headers
            .iter()
            .filter(|h| other.column_index(h).is_some())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        let mut set = RecordSet::new(vec![
            "Unique ID".into(),
            "Brand".into(),
            "Color".into(),
        ]);
        set.push_row(vec!["1".into(), "acme".into(), "red".into()]);
        set.push_row(vec!["2".into(), "acme".into()]);
        set
    }

    #[test]
    fn push_row_pads_to_header_width() {
        let set = sample();
        assert_eq!(set.rows()[1], vec!["2", "acme", ""]);
    }

    #[test]
    fn column_lookup_ignores_case_and_whitespace() {
        let set = sample();
        assert_eq!(set.column_index("unique id"), Some(0));
        assert_eq!(set.column_index("  BRAND "), Some(1));
        assert_eq!(set.column_index("missing"), None);
    }

    #[test]
    fn shared_columns_keep_self_order() {
        let set = sample();
        let other = RecordSet::new(vec!["color".into(), "Unique ID".into()]);
        assert_eq!(set.shared_columns(&other), vec!["Unique ID", "Color"]);
    }

    #[test]
    fn push_column_pads_short_value_lists() {
        let mut set = sample();
        set.push_column("Matched Unique ID", vec!["9".into()]);
        assert_eq!(set.headers().last().map(String::as_str), Some("Matched Unique ID"));
        assert_eq!(set.cell(0, 3), "9");
        assert_eq!(set.cell(1, 3), "");
    }
}
