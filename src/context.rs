use anyhow::{bail, Context as _, Result};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const CONFIG_ENV: &str = "GENCFG_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "gencfg.toml";

#[derive(Debug, Clone)]
pub struct ContextEnv {
    vars: BTreeMap<String, String>,
    home: Option<PathBuf>,
    cwd: PathBuf,

    config_path: Option<PathBuf>,
    config_dir: Option<PathBuf>,
}

impl ContextEnv {
    pub fn new() -> Result<Self> {
        let vars: BTreeMap<String, String> = std::env::vars().collect();

        let home = dirs::home_dir()
            .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
            .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from));

        let cwd = std::env::current_dir().context("could not determine current directory")?;

        Ok(Self::from_parts(vars, home, cwd))
    }

    pub fn from_parts(
        vars: BTreeMap<String, String>,
        home: Option<PathBuf>,
        cwd: PathBuf,
    ) -> Self {
        Self {
            vars,
            home,
            cwd,
            config_path: None,
            config_dir: None,
        }
    }

    // ---------- public getters ----------

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    // ---------- locating the task file ----------

    /// Task file precedence:
    /// 1) CLI --config (must exist)
    /// 2) GENCFG_CONFIG (must exist)
    /// 3) ./gencfg.toml (optional; None if absent)
    pub fn locate_config(&mut self, cli_config: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(p) = cli_config {
            let p = self.absolutize(p);
            if !p.is_file() {
                bail!("--config was provided but file does not exist: {}", p.display());
            }
            self.set_config_path(p.clone());
            return Ok(Some(p));
        }

        if let Some(p) = self.get_env_path(CONFIG_ENV) {
            let p = self.absolutize(&p);
            if !p.is_file() {
                bail!("{CONFIG_ENV} is set but file does not exist: {}", p.display());
            }
            self.set_config_path(p.clone());
            return Ok(Some(p));
        }

        let p = self.cwd.join(DEFAULT_CONFIG_FILE);
        if !p.is_file() {
            return Ok(None);
        }
        self.set_config_path(p.clone());
        Ok(Some(p))
    }

    fn set_config_path(&mut self, path: PathBuf) {
        self.config_dir = path.parent().map(Path::to_path_buf);
        self.config_path = Some(path);
    }

    fn get_env_path(&self, key: &str) -> Option<PathBuf> {
        self.vars
            .get(key)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    fn absolutize(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.cwd.join(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ctx_in(cwd: &Path, vars: &[(&str, &str)]) -> ContextEnv {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ContextEnv::from_parts(vars, Some(PathBuf::from("/home/me")), cwd.to_path_buf())
    }

    #[test]
    fn cli_config_wins_and_sets_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cli = dir.path().join("cli.toml");
        let env = dir.path().join("env.toml");
        fs::write(&cli, "").unwrap();
        fs::write(&env, "").unwrap();

        let mut ctx = ctx_in(dir.path(), &[(CONFIG_ENV, env.to_str().unwrap())]);
        let found = ctx.locate_config(Some(cli.as_path())).unwrap();

        assert_eq!(found.as_deref(), Some(cli.as_path()));
        assert_eq!(ctx.config_dir(), Some(dir.path()));
    }

    #[test]
    fn relative_cli_config_is_joined_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tasks.toml"), "").unwrap();

        let mut ctx = ctx_in(dir.path(), &[]);
        let found = ctx.locate_config(Some(Path::new("tasks.toml"))).unwrap();
        assert_eq!(found, Some(dir.path().join("tasks.toml")));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path(), &[]);
        assert!(ctx.locate_config(Some(dir.path().join("nope.toml").as_path())).is_err());

        let missing = dir.path().join("gone.toml");
        let mut ctx = ctx_in(dir.path(), &[(CONFIG_ENV, missing.to_str().unwrap())]);
        assert!(ctx.locate_config(None).is_err());
    }

    #[test]
    fn falls_back_to_cwd_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path(), &[(CONFIG_ENV, "  ")]);
        assert_eq!(ctx.locate_config(None).unwrap(), None);

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "").unwrap();
        assert_eq!(
            ctx.locate_config(None).unwrap(),
            Some(dir.path().join(DEFAULT_CONFIG_FILE))
        );
    }
}
