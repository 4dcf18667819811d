//! Projections of a tabular result into response payloads

use serde_json::{Map, Value as JsonValue};

use crate::schema::TabularResult;

/// One JSON object per row, keyed by column name
///
/// Objects serialize with keys in sorted order. When column names repeat,
/// the last column wins.
pub fn row_mapping(result: &TabularResult) -> Vec<Map<String, JsonValue>> {
    result
        .rows
        .iter()
        .map(|row| {
            result
                .columns
                .iter()
                .zip(row)
                .map(|(column, value)| (column.clone(), value.to_json()))
                .collect()
        })
        .collect()
}

/// CSV text with a header line, one `\n` terminated line per row
pub fn to_csv(result: &TabularResult) -> String {
    let mut output = String::new();

    write_record(&mut output, result.columns.iter().map(String::as_str));
    for row in &result.rows {
        let fields: Vec<String> = row.iter().map(|value| value.to_field()).collect();
        write_record(&mut output, fields.iter().map(String::as_str));
    }

    output
}

fn write_record<'a>(output: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (index, field) in fields.enumerate() {
        if index > 0 {
            output.push(',');
        }
        output.push_str(&escape_field(field));
    }
    output.push('\n');
}

/// Quote a field containing a separator, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
