use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::archive::ExtractionResult;

/// Version of the bundle spec format written to `apb.yml`.
pub const SPEC_VERSION: &str = "1.0";

/// The `apb.yml` document describing a chart as a service bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBundleDescriptor {
    pub version: String,
    pub name: String,
    pub description: String,
    pub bindable: bool,
    #[serde(rename = "async")]
    pub async_mode: String,
    pub metadata: DisplayMetadata,
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMetadata {
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub description: String,
    pub free: bool,
    pub metadata: BTreeMap<String, String>,
    pub parameters: Vec<ParameterDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub default: String,
    pub display_type: String,
}

impl ServiceBundleDescriptor {
    /// Build the descriptor for an extracted chart.
    ///
    /// The bundle always has a single free `default` plan whose only parameter
    /// is a `values` textarea pre-filled with the chart's values text.
    pub fn from_extraction(chart: &ExtractionResult) -> Self {
        let name = chart.name();

        let values = ParameterDescriptor {
            name: "values".to_owned(),
            title: "Values".to_owned(),
            param_type: "string".to_owned(),
            default: chart.values().to_owned(),
            display_type: "textarea".to_owned(),
        };

        let plan = Plan {
            name: "default".to_owned(),
            description: format!("Deploys helm chart {name}"),
            free: true,
            metadata: BTreeMap::new(),
            parameters: vec![values],
        };

        Self {
            version: SPEC_VERSION.to_owned(),
            name: format!("{name}-apb"),
            description: chart.description().to_owned(),
            bindable: false,
            async_mode: "optional".to_owned(),
            metadata: DisplayMetadata {
                display_name: format!("{name} (helm bundle)"),
                image_url: chart.icon().to_owned(),
            },
            plans: vec![plan],
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
