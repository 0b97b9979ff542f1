//! Generic stats table rendering.
//!
//! The UI API's record schemas evolve and are not known statically, so
//! rendering takes an explicit column list and degrades absent fields to a
//! sentinel instead of failing.

use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

/// Cell text substituted for a field a record does not carry.
pub const MISSING: &str = "MISSING";

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

impl Align {
    fn alignment(self) -> Alignment {
        match self {
            Align::Left => Alignment::left(),
            Align::Right => Alignment::right(),
        }
    }
}

/// Render one titled table block.
///
/// `data` is either a single record (exactly one row) or a sequence of
/// records (one row per element, input order preserved). Column order
/// follows `columns`, not the record's own field order. Every column gets
/// `default_align` unless an override names it.
pub fn format_section(
    title: &str,
    data: &Value,
    columns: &[&str],
    default_align: Align,
    overrides: &[(&str, Align)],
) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().copied());

    match data {
        Value::Array(records) => {
            for record in records {
                builder.push_record(columns.iter().map(|column| cell_text(record, column)));
            }
        }
        record => {
            builder.push_record(columns.iter().map(|column| cell_text(record, column)));
        }
    }

    let mut table = builder.build();
    table.with(Style::sharp());

    for (index, column) in columns.iter().enumerate() {
        let align = overrides
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, align)| *align)
            .unwrap_or(default_align);
        table.with(Modify::new(Columns::single(index)).with(align.alignment()));
    }

    format!("# {}\n{}", title, table)
}

/// One cell: the field's verbatim string form, or the sentinel.
///
/// Strings render unquoted; everything else renders as its JSON text. No
/// numeric formatting, unit conversion, or truncation.
fn cell_text(record: &Value, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(text)) => text.clone(),
        Some(value) => value.to_string(),
        None => MISSING.to_string(),
    }
}
