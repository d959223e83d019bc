use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

use crate::error::{GenCfgError, GenCfgResult};

pub type TokenMap = BTreeMap<String, String>;

/// The JSON properties file: which environments to generate and what each token expands to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Descriptor {
    pub environments: Vec<String>,

    #[serde(rename = "tokenValueMap")]
    pub token_value_map: TokenMap,
}

impl Descriptor {
    pub fn load_from_path(path: &Path) -> GenCfgResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| GenCfgError::MalformedDescriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_json_str(&text).map_err(|e| GenCfgError::MalformedDescriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
