use std::path::{Path, PathBuf};

use crate::error::{GenCfgError, GenCfgResult};

/// The three input paths after validation; every one is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPaths {
    pub template: PathBuf,
    pub target: PathBuf,
    pub properties: PathBuf,
}

/// Check the template, target and properties paths, in that order, without touching
/// the filesystem. Each must be present, non-empty and absolute.
pub fn validate_parameters(
    template: Option<&str>,
    target: Option<&str>,
    properties: Option<&str>,
) -> GenCfgResult<ValidatedPaths> {
    Ok(ValidatedPaths {
        template: check_path("template path", template)?,
        target: check_path("target path", target)?,
        properties: check_path("properties path", properties)?,
    })
}

fn check_path(param: &'static str, raw: Option<&str>) -> GenCfgResult<PathBuf> {
    let reason = match raw {
        None => "missing",
        Some("") => "empty",
        Some(s) if !Path::new(s).is_absolute() => "not an absolute path",
        Some(s) => return Ok(PathBuf::from(s)),
    };
    Err(GenCfgError::InvalidParameter { param, reason })
}
