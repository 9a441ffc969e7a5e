use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::util::error::CatalogError;

/// An API group paired with a version. The core group is the empty string.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GroupVersion {
    pub group: String,
    pub version: String,
}

impl GroupVersion {
    pub fn new(group: &str, version: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
        }
    }

    /// Accepts `version`, `group/version`, and the empty forms `""` and `"/"`.
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        if value.is_empty() || value == "/" {
            return Ok(Self::default());
        }

        match value.matches('/').count() {
            0 => Ok(Self::new("", value)),
            1 => {
                let (group, version) = value.split_once('/').unwrap_or((value, ""));
                Ok(Self::new(group, version))
            }
            _ => Err(CatalogError::MalformedGroupVersion(
                value.to_string(),
                "unexpected number of '/' separators".to_string(),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty()
    }
}

impl FromStr for GroupVersion {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for GroupVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_core() {
        let gv = GroupVersion::parse("v1").unwrap();
        assert_eq!(gv, GroupVersion::new("", "v1"));
        assert_eq!(gv.to_string(), "v1");
    }

    #[test]
    fn test_parse_named_group() {
        let gv: GroupVersion = "apps/v1".parse().unwrap();
        assert_eq!(gv.group, "apps");
        assert_eq!(gv.version, "v1");
        assert_eq!(gv.to_string(), "apps/v1");
    }

    #[test]
    fn test_parse_empty() {
        assert!(GroupVersion::parse("").unwrap().is_empty());
        assert!(GroupVersion::parse("/").unwrap().is_empty());
    }

    #[test]
    fn test_parse_leading_slash_normalizes_to_core() {
        let gv = GroupVersion::parse("/v1").unwrap();
        assert_eq!(gv, GroupVersion::new("", "v1"));
        assert_eq!(gv.to_string(), "v1");
    }

    #[test]
    fn test_parse_malformed() {
        let err = GroupVersion::parse("a/b/c").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedGroupVersion(gv, _) if gv == "a/b/c"));
    }
}
