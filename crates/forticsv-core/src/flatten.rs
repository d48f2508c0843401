// JSON-to-CSV flattening
//
// One header line from the column schema, one line per record. Cells are
// joined with commas; embedded commas inside values are stripped, never
// quoted -- the format is lossy by contract, and stripping is what keeps
// the column count stable for every consumer.

use serde_json::Value;

use crate::lookup::Lookup;

/// Interface records carry their addresses as `{ip, cidr_netmask}` pairs
/// instead of object references; this column gets its own rendering rule.
const ADDRESS_LIST_COLUMN: &str = "ipv4_addresses";

/// Reference lists embed the referenced object's name under this key.
const REFERENCE_KEY: &str = "q_origin_key";

/// Flatten a record collection into CSV text.
///
/// The output is deterministic for a given `(columns, records, lookup)`
/// triple: one header line plus one line per record, every line
/// `\n`-terminated, and every data line carrying exactly
/// `columns.len()` cells regardless of which fields each record has.
pub fn build_csv(columns: &[&str], records: &[Value], lookup: Option<&Lookup>) -> String {
    let mut csv = String::new();
    csv.push_str(&columns.join(","));
    csv.push('\n');

    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| render_cell(column, record.get(*column), lookup))
            .collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }

    csv
}

/// Render one schema field of one record into a comma-free cell.
///
/// The value shapes form a closed set; each gets exactly one rule here,
/// so a new field shape is one new arm, not restructured conditionals.
fn render_cell(column: &str, value: Option<&Value>, lookup: Option<&Lookup>) -> String {
    match value {
        // Absent from the record, or explicitly null.
        None | Some(Value::Null) => String::new(),
        Some(Value::Array(items)) => render_list(column, items, lookup),
        Some(Value::String(text)) => text.replace(',', ""),
        Some(Value::Bool(flag)) => resolve_scalar(flag.to_string(), lookup),
        Some(Value::Number(number)) => resolve_scalar(number.to_string(), lookup),
        // A nested object cannot be rendered into one comma-free cell;
        // no schema field carries one.
        Some(Value::Object(_)) => String::new(),
    }
}

/// Render a list field. Sub-values join with a single space -- a comma
/// would break the CSV column boundaries.
fn render_list(column: &str, items: &[Value], lookup: Option<&Lookup>) -> String {
    if items.is_empty() {
        return String::new();
    }

    let subitems: Vec<String> = if column == ADDRESS_LIST_COLUMN {
        items.iter().filter_map(render_interface_address).collect()
    } else {
        items
            .iter()
            .filter_map(|item| item.get(REFERENCE_KEY).and_then(Value::as_str))
            .map(|name| resolve_scalar(name.to_owned(), lookup))
            .collect()
    };

    subitems.join(" ")
}

/// `{ip, cidr_netmask}` -> `ip/cidr`. Elements missing either sub-value
/// are skipped rather than emitting a ragged fragment.
fn render_interface_address(item: &Value) -> Option<String> {
    let ip = item.get("ip").and_then(Value::as_str)?;
    let mask = match item.get("cidr_netmask")? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    Some(format!("{ip}/{mask}"))
}

/// Substitute a scalar through the lookup table when it names a known
/// object; otherwise the textual form passes through verbatim.
fn resolve_scalar(text: String, lookup: Option<&Lookup>) -> String {
    match lookup.and_then(|table| table.resolve(&text)) {
        Some(display) => display.to_owned(),
        None => text,
    }
}
