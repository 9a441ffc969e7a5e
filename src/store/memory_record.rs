use crate::model::catalog_entry::CatalogEntry;
use crate::store::{ensure_known_field, RecordSink};
use crate::util::error::CatalogError;

#[derive(Debug, Default, Clone)]
pub struct MemoryRecord {
    pub id: Option<String>,
    pub api_resources: Option<Vec<CatalogEntry>>,
    fail_set_field: bool,
    fail_set_id: bool,
}

impl MemoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record that rejects every table write.
    pub fn failing_field() -> Self {
        Self {
            fail_set_field: true,
            ..Self::default()
        }
    }

    /// A record that rejects every id write.
    pub fn failing_id() -> Self {
        Self {
            fail_set_id: true,
            ..Self::default()
        }
    }

    pub fn is_untouched(&self) -> bool {
        self.id.is_none() && self.api_resources.is_none()
    }
}

impl RecordSink for MemoryRecord {
    fn set_field(&mut self, field: &str, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
        ensure_known_field(field)?;
        if self.fail_set_field {
            return Err(CatalogError::Write(format!("{field} is read-only")));
        }
        self.api_resources = Some(entries.to_vec());
        Ok(())
    }

    fn set_id(&mut self, id: &str) -> Result<(), CatalogError> {
        if self.fail_set_id {
            return Err(CatalogError::Write("id is read-only".to_string()));
        }
        self.id = Some(id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::API_RESOURCES_FIELD;

    #[test]
    fn test_unknown_field() {
        let mut record = MemoryRecord::new();
        let err = record.set_field("namespaces", &[]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownField(field) if field == "namespaces"));
        assert!(record.is_untouched());
    }

    #[test]
    fn test_failing_writes() {
        assert!(MemoryRecord::failing_field()
            .set_field(API_RESOURCES_FIELD, &[])
            .is_err());
        assert!(MemoryRecord::failing_id().set_id("abc").is_err());
    }
}
