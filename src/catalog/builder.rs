use crate::catalog::diagnostic::Diagnostic;
use crate::catalog::fingerprint::fingerprint;
use crate::model::catalog_entry::{Catalog, CatalogEntry};
use crate::model::group_version::GroupVersion;
use crate::model::resource_descriptor::ResourceList;
use crate::util::error::CatalogError;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub diagnostics: Vec<Diagnostic>,
}

impl CatalogBuild {
    pub fn skipped(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_skip())
    }
}

/// Flattens grouped discovery data into a catalog sorted by fully qualified name and
/// fingerprints it. Malformed group-versions drop their whole group; nothing here fails.
pub fn build_catalog(lists: impl IntoIterator<Item = ResourceList>) -> CatalogBuild {
    let mut diagnostics = vec![];
    let mut entries = vec![];

    for list in lists {
        if list.resources.is_empty() {
            diagnostics.push(Diagnostic::EmptyGroup {
                group_version: list.group_version,
            });
            continue;
        }

        let gv = match GroupVersion::parse(&list.group_version) {
            Ok(gv) => gv,
            Err(err) => {
                let reason = match err {
                    CatalogError::MalformedGroupVersion(_, reason) => reason,
                    other => other.to_string(),
                };
                diagnostics.push(Diagnostic::MalformedGroupVersion {
                    group_version: list.group_version,
                    reason,
                });
                continue;
            }
        };

        for resource in list.resources {
            if !resource.is_actionable() {
                diagnostics.push(Diagnostic::VerblessResource {
                    group_version: list.group_version.clone(),
                    name: resource.name,
                });
                continue;
            }
            entries.push(CatalogEntry::project(&gv, resource));
        }
    }

    for entry in entries.iter_mut() {
        entry.qualify();
        diagnostics.push(Diagnostic::Found {
            fully_qualified_name: entry.fully_qualified_name.clone(),
        });
    }

    // stable, byte-wise
    entries.sort_by(|a, b| a.fully_qualified_name.cmp(&b.fully_qualified_name));

    let id = fingerprint(
        entries
            .iter()
            .map(|entry| entry.fully_qualified_name.as_str()),
    );

    CatalogBuild {
        catalog: Catalog { id, entries },
        diagnostics,
    }
}
