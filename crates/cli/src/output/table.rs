//! Console table rendering
//!
//! Renders the banned-users result set as an aligned console table. The
//! file output never goes through this path; it uses the dedicated
//! delimited encoder in bu-core instead.

use comfy_table::{Table, presets};

use bu_core::{COLUMN_HEADERS, UserRecord};

/// Build the console table for the given records.
///
/// Compact borderless style; the header row is omitted when
/// `with_headers` is false.
pub fn render_table(records: &[UserRecord], with_headers: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);

    if with_headers {
        table.set_header(COLUMN_HEADERS);
    }
    for record in records {
        table.add_row(record.row());
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<UserRecord> {
        vec![UserRecord {
            id: 1,
            email: "alice@example.com".into(),
            banned_at: Some("2024-03-01T10:00:00Z".parse().unwrap()),
            activated_at: None,
            deleted_at: None,
        }]
    }

    #[test]
    fn test_table_contains_record_cells() {
        let rendered = render_table(&records(), false).to_string();
        assert!(rendered.contains("alice@example.com"));
        assert!(rendered.contains("2024-03-01T10:00:00Z"));
        assert!(!rendered.contains("email"));
    }

    #[test]
    fn test_table_header_row_is_optional() {
        let rendered = render_table(&records(), true).to_string();
        assert!(rendered.contains("id"));
        assert!(rendered.contains("email"));
        assert!(rendered.contains("banned_at"));
    }

    #[test]
    fn test_empty_result_renders_empty_table() {
        let rendered = render_table(&[], false).to_string();
        assert!(rendered.trim().is_empty());
    }
}
