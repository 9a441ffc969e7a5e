use std::fmt::{Display, Formatter};

/// Something the builder noticed while flattening discovery data. None of these are errors.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Diagnostic {
    EmptyGroup {
        group_version: String,
    },
    MalformedGroupVersion {
        group_version: String,
        reason: String,
    },
    VerblessResource {
        group_version: String,
        name: String,
    },
    Found {
        fully_qualified_name: String,
    },
}

impl Diagnostic {
    pub fn is_skip(&self) -> bool {
        !matches!(self, Diagnostic::Found { .. })
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::EmptyGroup { group_version } => {
                write!(f, "Skipped {group_version:?}: no resources")
            }
            Diagnostic::MalformedGroupVersion {
                group_version,
                reason,
            } => write!(f, "Skipped malformed group version {group_version:?}: {reason}"),
            Diagnostic::VerblessResource {
                group_version,
                name,
            } => write!(f, "Skipped {name} in {group_version:?}: no verbs"),
            Diagnostic::Found {
                fully_qualified_name,
            } => write!(f, "Found API resource: {fully_qualified_name}"),
        }
    }
}
