use std::io::Write;

use itertools::Itertools;
use k8s_openapi::serde_json;
use log::debug;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::config::output_format::OutputFormat;
use crate::model::catalog_entry::CatalogEntry;
use crate::store::{ensure_known_field, RecordSink};
use crate::util::error::CatalogError;

const TABLE_HEADERS: [&str; 6] = [
    "NAME",
    "APIVERSION",
    "KIND",
    "NAMESPACED",
    "SHORTNAMES",
    "VERBS",
];

#[derive(Serialize)]
struct RenderedRecord<'a> {
    id: &'a str,
    api_resources: &'a [CatalogEntry],
}

/// Renders the record to a writer once its id is set.
pub struct WriterRecord<W: Write> {
    writer: W,
    format: OutputFormat,
    api_resources: Vec<CatalogEntry>,
}

impl<W: Write> WriterRecord<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            api_resources: vec![],
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self, id: &str) -> Result<(), CatalogError> {
        debug!("Rendering record {id} as {}", self.format.as_ref());
        let record = RenderedRecord {
            id,
            api_resources: &self.api_resources,
        };

        match self.format {
            OutputFormat::Yaml => serde_yaml::to_writer(&mut self.writer, &record)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, &record)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Table => {
                let table = render_table(&self.api_resources);
                writeln!(self.writer, "{table}")?;
                writeln!(self.writer, "ID: {id}")?;
            }
        }
        self.writer.flush()?;

        Ok(())
    }
}

fn table_row(entry: &CatalogEntry) -> [String; 6] {
    [
        entry.fully_qualified_name.clone(),
        entry.api_group_version.clone(),
        entry.kind.clone(),
        entry.namespaced.to_string(),
        entry.shortnames.iter().join(","),
        format!("[{}]", entry.verbs.iter().join(" ")),
    ]
}

fn render_table(entries: &[CatalogEntry]) -> String {
    let mut builder = Builder::default();
    builder.push_record(TABLE_HEADERS);
    for entry in entries {
        builder.push_record(table_row(entry));
    }
    builder.build().with(Style::blank()).to_string()
}

impl<W: Write> RecordSink for WriterRecord<W> {
    fn set_field(&mut self, field: &str, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
        ensure_known_field(field)?;
        self.api_resources = entries.to_vec();
        Ok(())
    }

    fn set_id(&mut self, id: &str) -> Result<(), CatalogError> {
        self.render(id)
    }
}
