use anyhow::{bail, Context as _, Result};
use serde::Deserialize;
use std::{collections::BTreeSet, fs, path::Path};

use crate::{context::ContextEnv, generate::GenerationParams, resolve::Resolver};

/// A `gencfg.toml` file: any number of `[[task]]` tables, run in declaration order.
#[derive(Debug, Default, Deserialize)]
pub struct TaskFile {
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    pub name: String,

    // Optional here so the validator, not serde, reports which one is missing.
    #[serde(default)]
    pub template_path: Option<String>,
    #[serde(default)]
    pub target_path: Option<String>,
    #[serde(default)]
    pub properties_path: Option<String>,

    #[serde(default)]
    pub atomic: bool,
}

impl TaskFile {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read task file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid task file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: Self = toml::from_str(text)?;

        let mut seen = BTreeSet::new();
        for t in &file.tasks {
            if t.name.trim().is_empty() {
                bail!("task name cannot be empty");
            }
            if !seen.insert(t.name.clone()) {
                bail!("duplicate task name '{}'", t.name);
            }
        }

        Ok(file)
    }

    /// Tasks to run: all of them when `names` is empty, otherwise the named ones in
    /// declaration order.
    pub fn select(&self, names: &[String]) -> Result<Vec<&TaskConfig>> {
        if names.is_empty() {
            return Ok(self.tasks.iter().collect());
        }

        for n in names {
            if !self.tasks.iter().any(|t| &t.name == n) {
                bail!("unknown task '{n}'");
            }
        }

        Ok(self
            .tasks
            .iter()
            .filter(|t| names.contains(&t.name))
            .collect())
    }
}

impl TaskConfig {
    pub fn to_params(&self, ctx: &ContextEnv) -> Result<GenerationParams> {
        let r = Resolver::new(ctx);
        let resolve = |field: &str, raw: &Option<String>| -> Result<Option<String>> {
            raw.as_deref()
                .map(|s| {
                    r.resolve(s)
                        .with_context(|| format!("task.{}: failed to resolve {field}: {s}", self.name))
                })
                .transpose()
        };

        Ok(GenerationParams {
            template_path: resolve("template_path", &self.template_path)?,
            target_path: resolve("target_path", &self.target_path)?,
            properties_path: resolve("properties_path", &self.properties_path)?,
            atomic: self.atomic,
        })
    }
}
