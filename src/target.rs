use std::path::{Path, PathBuf};

use crate::error::{GenCfgError, GenCfgResult};

/// Output path for `environment`, derived from the base target path.
///
/// The empty environment is the default (production) one and writes to `base` itself.
/// Any other environment is appended to the file stem: `app.properties` becomes
/// `app_dev.properties`. The file name is split on its first dot, so
/// `app.conf.tpl` becomes `app_dev.conf.tpl` and `app` becomes `app_dev`.
pub fn derive_target_path(base: &Path, environment: &str) -> GenCfgResult<PathBuf> {
    if environment.is_empty() {
        return Ok(base.to_path_buf());
    }

    let file_name = base
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(GenCfgError::InvalidParameter {
            param: "target path",
            reason: "has no usable file name",
        })?;

    let derived = match file_name.split_once('.') {
        Some((name, extension)) => format!("{name}_{environment}.{extension}"),
        None => format!("{file_name}_{environment}"),
    };

    Ok(base.with_file_name(derived))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(base: &str, env: &str) -> PathBuf {
        derive_target_path(Path::new(base), env).unwrap()
    }

    #[test]
    fn default_environment_keeps_base() {
        assert_eq!(derive("/out/app.properties", ""), PathBuf::from("/out/app.properties"));
    }

    #[test]
    fn named_environment_gets_suffix() {
        assert_eq!(
            derive("/out/app.properties", "dev"),
            PathBuf::from("/out/app_dev.properties")
        );
    }

    #[test]
    fn relative_paths_work_too() {
        assert_eq!(
            derive("conf/app.yaml", "qa"),
            PathBuf::from("conf/app_qa.yaml")
        );
        assert_eq!(derive("app.yaml", "qa"), PathBuf::from("app_qa.yaml"));
    }

    #[test]
    fn splits_on_first_dot() {
        assert_eq!(derive("/out/a.b.c", "dev"), PathBuf::from("/out/a_dev.b.c"));
    }

    #[test]
    fn odd_file_names() {
        assert_eq!(derive("/out/app", "dev"), PathBuf::from("/out/app_dev"));
        assert_eq!(derive("/out/.env", "dev"), PathBuf::from("/out/_dev.env"));
        assert_eq!(derive("/out/app.", "dev"), PathBuf::from("/out/app_dev."));
    }

    #[test]
    fn parent_directories_with_dots_are_untouched() {
        assert_eq!(
            derive("/etc/my.app.d/server.conf", "prod-eu"),
            PathBuf::from("/etc/my.app.d/server_prod-eu.conf")
        );
    }

    #[test]
    fn no_file_name_is_rejected() {
        for base in ["/", "/out/.."] {
            let err = derive_target_path(Path::new(base), "dev").unwrap_err();
            assert!(matches!(
                err,
                GenCfgError::InvalidParameter { param: "target path", .. }
            ));
        }
    }
}
