//! Terminal rendering of assistant messages
//!
//! Text bodies print as-is, table payloads render through `prettytable`,
//! and chart payloads are summarized from their declarative spec since a
//! terminal cannot draw them. The full spec is preserved for export.

use crate::session::{Message, TablePayload};
use prettytable::{format, Cell, Row, Table};

/// Render a message body for terminal display
pub fn render_body(message: &Message) -> String {
    if let Some(content) = &message.content {
        return content.clone();
    }
    if let Some(spec) = &message.chart {
        return summarize_chart(spec);
    }
    if let Some(table) = &message.table {
        return format_table(table);
    }
    String::new()
}

/// Render a table payload as a bordered terminal table
pub fn format_table(table: &TablePayload) -> String {
    let mut out = Table::new();
    out.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    out.add_row(Row::new(
        table.columns.iter().map(|c| Cell::new(c)).collect(),
    ));
    for row in &table.rows {
        out.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
    }
    out.to_string()
}

/// Summarize a declarative chart spec in one line
///
/// Reads the mark type and the x/y encodings; anything missing falls back
/// to a generic label. The description field is included when present.
pub fn summarize_chart(spec: &serde_json::Value) -> String {
    let mark = spec["mark"].as_str().unwrap_or("chart");
    let x = spec["encoding"]["x"]["field"].as_str().unwrap_or("?");
    let y = spec["encoding"]["y"]["field"].as_str().unwrap_or("?");
    let points = spec["data"]["values"]
        .as_array()
        .map(|v| v.len())
        .unwrap_or(0);

    let mut summary = format!("[{} chart] {} by {} ({} points)", mark, y, x, points);
    if let Some(description) = spec["description"].as_str() {
        summary = format!("{} — {}", summary, description);
    }
    summary.push_str("\nUse /export or `genbi export` to save the full chart spec.");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_body_text_message() {
        let msg = Message::assistant("Revenue is up.");
        assert_eq!(render_body(&msg), "Revenue is up.");
    }

    #[test]
    fn test_format_table_includes_headers_and_cells() {
        let table = TablePayload::new(
            vec!["Product".into(), "Revenue".into()],
            vec![vec!["Widget A".into(), "$15,500".into()]],
        );
        let rendered = format_table(&table);
        assert!(rendered.contains("Product"));
        assert!(rendered.contains("Widget A"));
        assert!(rendered.contains("$15,500"));
    }

    #[test]
    fn test_summarize_chart_reads_encodings() {
        let spec = json!({
            "mark": "line",
            "description": "Monthly revenue trend",
            "encoding": {
                "x": {"field": "month", "type": "ordinal"},
                "y": {"field": "revenue", "type": "quantitative"}
            },
            "data": {"values": [{"month": "Jan", "revenue": 1}, {"month": "Feb", "revenue": 2}]}
        });
        let summary = summarize_chart(&spec);
        assert!(summary.contains("line chart"));
        assert!(summary.contains("revenue by month"));
        assert!(summary.contains("2 points"));
        assert!(summary.contains("Monthly revenue trend"));
    }

    #[test]
    fn test_summarize_chart_tolerates_missing_fields() {
        let summary = summarize_chart(&json!({}));
        assert!(summary.contains("chart"));
        assert!(summary.contains("0 points"));
    }

    #[test]
    fn test_render_body_dispatches_on_payload() {
        let chart = Message::assistant_chart(json!({"mark": "bar"}));
        assert!(render_body(&chart).contains("bar chart"));

        let table = Message::assistant_table(TablePayload::new(
            vec!["A".into()],
            vec![vec!["1".into()]],
        ));
        assert!(render_body(&table).contains('A'));
    }
}
