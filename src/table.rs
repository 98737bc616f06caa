use std::fmt::Display;
use std::io::Write;

use crate::error::Result;

pub const DEFAULT_FEATURE_NAME: &str = "feature";
pub const CLASS_COLUMN: &str = "class";

// A two-column table of (value, label) rows, grouped by label in the order
// the labels were given
#[derive(Debug, Clone, PartialEq)]
pub struct SampledTable<L> {
    feature_name: String,
    rows: Vec<(f64, L)>,
}

impl<L> SampledTable<L> {
    // An absent or empty name falls back to "feature"
    pub fn new(feature_name: Option<&str>, rows: Vec<(f64, L)>) -> Self {
        let feature_name = match feature_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_FEATURE_NAME.to_string(),
        };
        Self { feature_name, rows }
    }

    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    pub fn column_names(&self) -> [&str; 2] {
        [self.feature_name.as_str(), CLASS_COLUMN]
    }

    pub fn rows(&self) -> &[(f64, L)] {
        &self.rows
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|(value, _)| *value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> + '_ {
        self.rows.iter().map(|(_, label)| label)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<(f64, L)> {
        self.rows
    }

    // Set values at or above `max` to `max`, then values at or below `min` to `min`.
    // The order matters when min >= max: anything hitting both ends up at `min`.
    pub(crate) fn clamp(&mut self, min: Option<f64>, max: Option<f64>) {
        if let Some(max) = max {
            self.rows
                .iter_mut()
                .filter(|(value, _)| *value >= max)
                .for_each(|(value, _)| *value = max);
        }
        if let Some(min) = min {
            self.rows
                .iter_mut()
                .filter(|(value, _)| *value <= min)
                .for_each(|(value, _)| *value = min);
        }
    }
}

impl<L: PartialEq> SampledTable<L> {
    pub fn rows_for<'a>(&'a self, label: &'a L) -> impl Iterator<Item = f64> + 'a {
        self.rows
            .iter()
            .filter(move |(_, row_label)| row_label == label)
            .map(|(value, _)| *value)
    }
}

impl<L: Display> SampledTable<L> {
    // Write the table as CSV with a `<feature>,class` header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        self.to_csv_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_writer<W: Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        writer.write_record(self.column_names())?;
        for (value, label) in &self.rows {
            writer.write_record([value.to_string(), label.to_string()])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SampledTable<&'static str> {
        SampledTable::new(
            Some("height"),
            vec![(1.5, "a"), (-3.0, "a"), (7.25, "b"), (12.0, "b")],
        )
    }

    #[test]
    fn test_default_feature_name() {
        let table: SampledTable<u8> = SampledTable::new(None, vec![]);
        assert_eq!(table.column_names(), ["feature", "class"]);
        let table: SampledTable<u8> = SampledTable::new(Some(""), vec![]);
        assert_eq!(table.feature_name(), "feature");
    }

    #[test]
    fn test_clamp_both_bounds() {
        let mut table = table();
        table.clamp(Some(0.0), Some(10.0));
        assert_eq!(table.values().collect::<Vec<_>>(), vec![1.5, 0.0, 7.25, 10.0]);
        // Labels are never touched
        assert_eq!(table.labels().copied().collect::<Vec<_>>(), vec!["a", "a", "b", "b"]);
    }

    #[test]
    fn test_clamp_inverted_bounds_prefers_min() {
        let mut table = table();
        table.clamp(Some(5.0), Some(2.0));
        // Everything >= 2 becomes 2, then everything <= 5 (now all of it) becomes 5
        assert!(table.values().all(|value| value == 5.0));
    }

    #[test]
    fn test_clamp_max_only() {
        let mut table = table();
        table.clamp(None, Some(7.25));
        assert_eq!(table.values().collect::<Vec<_>>(), vec![1.5, -3.0, 7.25, 7.25]);
    }

    #[test]
    fn test_clamp_min_only() {
        let mut table = table();
        table.clamp(Some(1.5), None);
        assert_eq!(table.values().collect::<Vec<_>>(), vec![1.5, 1.5, 7.25, 12.0]);
    }

    #[test]
    fn test_rows_for() {
        let table = table();
        assert_eq!(table.rows_for(&"b").collect::<Vec<_>>(), vec![7.25, 12.0]);
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        table().write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "height,class\n1.5,a\n-3,a\n7.25,b\n12,b\n");
    }
}
