use anyhow::{anyhow, bail, Result};

use crate::context::ContextEnv;

/// Expands `{home}`, `{cwd}`, `{config_path}`, `{config_dir}` and `{env.NAME}` in task-file
/// paths.
///
/// This is unrelated to the `[token]` syntax of templates.
pub struct Resolver<'a> {
    pub ctx: &'a ContextEnv,
}

impl<'a> Resolver<'a> {
    pub fn new(ctx: &'a ContextEnv) -> Self {
        Self { ctx }
    }

    pub fn resolve(&self, input: &str) -> Result<String> {
        // Fast path
        if !input.contains('{') {
            return Ok(input.to_string());
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);

            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                bail!("unclosed placeholder in path: {input}");
            };

            let name = &after[..close];
            let value = self
                .value(name)
                .ok_or_else(|| anyhow!("unknown placeholder {{{name}}} in path: {input}"))?;

            out.push_str(&value);
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }

    fn value(&self, name: &str) -> Option<String> {
        // env.*
        if let Some(var) = name.strip_prefix("env.") {
            return self.ctx.var(var).map(str::to_string);
        }

        match name {
            "home" => self.ctx.home().map(|p| p.to_string_lossy().to_string()),
            "cwd" => Some(self.ctx.cwd().to_string_lossy().to_string()),
            "config_path" => self
                .ctx
                .config_path()
                .map(|p| p.to_string_lossy().to_string()),
            "config_dir" => self
                .ctx
                .config_dir()
                .map(|p| p.to_string_lossy().to_string()),
            _ => None,
        }
    }
}
