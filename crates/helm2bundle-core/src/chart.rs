use serde::{Deserialize, Deserializer};

/// Metadata read from a chart's `Chart.yaml`.
///
/// Only the fields needed to describe the service bundle are kept; every
/// other key in the document is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartMetadata {
    /// Chart name. Empty when the document has no `name` key.
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    /// Icon URL, empty when absent.
    #[serde(deserialize_with = "null_as_empty")]
    pub icon: String,
}

impl ChartMetadata {
    /// Parse chart metadata from the raw contents of a `Chart.yaml` member.
    ///
    /// An empty document yields an all-empty record rather than an error.
    /// Only the first document of a multi-document stream is read.
    pub fn from_yaml(content: &[u8]) -> crate::Result<Self> {
        if content.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("chart metadata document is empty");
            return Ok(Self::default());
        }

        match serde_yaml::Deserializer::from_slice(content).next() {
            Some(document) => {
                Self::deserialize(document).map_err(|e| crate::Error::ChartParse { source: e })
            }
            None => Ok(Self::default()),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

/// `description:` with no value is a null scalar; read it as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => Ok(value),
        None => Ok(String::new()),
    }
}
