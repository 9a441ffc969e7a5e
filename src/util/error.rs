use k8s_openapi::serde_json;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Malformed group version {0:?}: {1}")]
    MalformedGroupVersion(String, String),

    #[error("Unknown record field: {0}")]
    UnknownField(String),

    #[error("Record write error: {0}")]
    Write(String),

    #[error("Error: {0}")]
    AnyhowError(#[from] anyhow::Error),

    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML Serialization error: {0}")]
    SerdeYamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("Static string error: {0}")]
    StrError(&'static str),
}

impl From<&'static str> for CatalogError {
    fn from(value: &'static str) -> Self {
        Self::StrError(value)
    }
}
