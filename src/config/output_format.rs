use strum_macros::{AsRefStr, Display, EnumString};

/// Parsed from `--output` through `FromStr`, printed through `Display`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Table,
}
