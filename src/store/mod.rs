use crate::model::catalog_entry::CatalogEntry;
use crate::util::error::CatalogError;

pub mod fs_record_store;
pub mod memory_record;
pub mod writer_record;

/// The record field holding the catalog table.
pub const API_RESOURCES_FIELD: &str = "api_resources";

/// Output side of a read: a record with a named table field and an identity.
pub trait RecordSink {
    fn set_field(&mut self, field: &str, entries: &[CatalogEntry]) -> Result<(), CatalogError>;

    fn set_id(&mut self, id: &str) -> Result<(), CatalogError>;
}

/// Writes go to every sink in order; the first failure stops the rest.
impl RecordSink for Vec<Box<dyn RecordSink>> {
    fn set_field(&mut self, field: &str, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
        for sink in self.iter_mut() {
            sink.set_field(field, entries)?;
        }
        Ok(())
    }

    fn set_id(&mut self, id: &str) -> Result<(), CatalogError> {
        for sink in self.iter_mut() {
            sink.set_id(id)?;
        }
        Ok(())
    }
}

pub(crate) fn ensure_known_field(field: &str) -> Result<(), CatalogError> {
    if field == API_RESOURCES_FIELD {
        Ok(())
    } else {
        Err(CatalogError::UnknownField(field.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::output_format::OutputFormat;
    use crate::store::writer_record::WriterRecord;

    #[test]
    fn test_fanout_stops_at_first_failure() {
        let mut sinks: Vec<Box<dyn RecordSink>> = vec![
            Box::new(WriterRecord::new(std::io::sink(), OutputFormat::Json)),
            Box::new(memory_record::MemoryRecord::failing_id()),
        ];

        sinks.set_field(API_RESOURCES_FIELD, &[]).unwrap();
        assert!(matches!(sinks.set_id("abc"), Err(CatalogError::Write(_))));
        assert!(matches!(
            sinks.set_field("other", &[]),
            Err(CatalogError::UnknownField(_))
        ));
    }
}
