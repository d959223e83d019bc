use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info, warn};

use crate::{
    descriptor::{Descriptor, TokenMap},
    error::{GenCfgError, GenCfgResult, MissingToken},
    substitute::{derive_map, substitute_line, tokens_in_line},
    target::derive_target_path,
    validate::{validate_parameters, ValidatedPaths},
};

/// Raw inputs for one generation run, as supplied by the CLI or a task file.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    pub template_path: Option<String>,
    pub target_path: Option<String>,
    pub properties_path: Option<String>,

    /// Write each environment to a temp file and rename it into place on success.
    pub atomic: bool,
}

impl GenerationParams {
    pub fn new(
        template_path: impl Into<String>,
        target_path: impl Into<String>,
        properties_path: impl Into<String>,
    ) -> Self {
        Self {
            template_path: Some(template_path.into()),
            target_path: Some(target_path.into()),
            properties_path: Some(properties_path.into()),
            atomic: false,
        }
    }

    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn validate(&self) -> GenCfgResult<ValidatedPaths> {
        validate_parameters(
            self.template_path.as_deref(),
            self.target_path.as_deref(),
            self.properties_path.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub environment: String,
    pub path: PathBuf,
    pub lines: usize,
}

/// Generate one output file per declared environment, in declaration order.
///
/// Stops at the first failure. Files already written for earlier environments stay on
/// disk; without `atomic` the failing environment's file may be partially written.
pub fn generate(params: &GenerationParams) -> GenCfgResult<Vec<GeneratedFile>> {
    let paths = params.validate()?;
    let descriptor = Descriptor::load_from_path(&paths.properties)?;

    debug!(
        descriptor = %paths.properties.display(),
        environments = descriptor.environments.len(),
        tokens = descriptor.token_value_map.len(),
        "loaded descriptor"
    );

    let mut generated = Vec::with_capacity(descriptor.environments.len());

    for environment in &descriptor.environments {
        let target = derive_target_path(&paths.target, environment)?;
        let map = derive_map(&descriptor.token_value_map, environment);

        debug!(env = %environment, target = %target.display(), "generating");

        let lines = write_environment(&paths.template, &target, &map, params.atomic)
            .inspect_err(|e| warn!(env = %environment, target = %target.display(), "{e}"))?;

        info!(env = %environment, lines, "wrote {}", target.display());

        generated.push(GeneratedFile {
            environment: environment.clone(),
            path: target,
            lines,
        });
    }

    Ok(generated)
}

/// Dry run: verify that every token in the template resolves for every environment and
/// that every target path can be derived. Nothing is written.
pub fn check(params: &GenerationParams) -> GenCfgResult<Vec<PathBuf>> {
    let paths = params.validate()?;
    let descriptor = Descriptor::load_from_path(&paths.properties)?;
    let text = fs::read_to_string(&paths.template)
        .map_err(|e| GenCfgError::io(&paths.template, e))?;

    let mut targets = Vec::with_capacity(descriptor.environments.len());

    for environment in &descriptor.environments {
        let target = derive_target_path(&paths.target, environment)?;
        let map = derive_map(&descriptor.token_value_map, environment);

        for (idx, line) in text.lines().enumerate() {
            if let Some(token) = tokens_in_line(line)
                .into_iter()
                .find(|t| !map.contains_key(*t))
            {
                return Err(GenCfgError::MissingToken {
                    token: token.to_string(),
                    template: paths.template.clone(),
                    line: idx + 1,
                });
            }
        }

        targets.push(target);
    }

    Ok(targets)
}

fn write_environment(
    template: &Path,
    target: &Path,
    map: &TokenMap,
    atomic: bool,
) -> GenCfgResult<usize> {
    let file = File::open(template).map_err(|e| GenCfgError::io(template, e))?;
    let reader = BufReader::new(file);

    if !atomic {
        let out = File::create(target).map_err(|e| GenCfgError::io(target, e))?;
        let mut out = BufWriter::new(out);
        let lines = render_lines(reader, template, &mut out, target, map)?;
        out.flush().map_err(|e| GenCfgError::io(target, e))?;
        return Ok(lines);
    }

    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = atomic_temp_file(dir, target)?;
    let mut out = BufWriter::new(tmp);
    let lines = render_lines(reader, template, &mut out, target, map)?;

    let tmp = out
        .into_inner()
        .map_err(|e| GenCfgError::io(target, e.into_error()))?;
    tmp.persist(target)
        .map_err(|e| GenCfgError::io(target, e.error))?;

    Ok(lines)
}

/// Temp file that ends up with the same mode `File::create` would give `target`: the
/// existing target's permissions, or 0o666 minus the umask for a new file.
fn atomic_temp_file(dir: &Path, target: &Path) -> GenCfgResult<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder
        .tempfile_in(dir)
        .map_err(|e| GenCfgError::io(dir, e))?;

    if let Ok(meta) = fs::metadata(target) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| GenCfgError::io(tmp.path(), e))?;
    }

    Ok(tmp)
}

fn render_lines<R: BufRead, W: Write>(
    reader: R,
    template: &Path,
    out: &mut W,
    target: &Path,
    map: &TokenMap,
) -> GenCfgResult<usize> {
    let mut count = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| GenCfgError::io(template, e))?;
        let rendered = substitute_line(&line, map).map_err(|MissingToken(token)| {
            GenCfgError::MissingToken {
                token,
                template: template.to_path_buf(),
                line: idx + 1,
            }
        })?;

        writeln!(out, "{rendered}").map_err(|e| GenCfgError::io(target, e))?;
        count += 1;
    }

    Ok(count)
}
