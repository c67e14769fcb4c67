use crate::message::Message;
use crate::ui::theme;
use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
struct DiagnosticRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Render parsed diagnostics as a rounded table, one row per message.
/// The Kind column is styled by severity.
pub fn diagnostics_table(messages: &[Message]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let theme = theme();
    let rows: Vec<DiagnosticRow> = messages
        .iter()
        .map(|msg| DiagnosticRow {
            kind: msg
                .kind
                .as_str()
                .style(theme.for_kind(msg.kind).clone())
                .to_string(),
            location: match (&msg.source_path, msg.line_number) {
                (Some(path), Some(line)) => format!("{}:{}", path, line),
                (Some(path), None) => path.clone(),
                _ => "-".to_string(),
            },
            message: msg.text.clone(),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}
