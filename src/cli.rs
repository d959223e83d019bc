use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gencfg", version, about)]
pub struct Args {
    /// Absolute path to the template whose [tokens] get replaced
    #[arg(long, env = "GENCFG_TEMPLATE")]
    pub template: Option<String>,

    /// Absolute base path of the generated file; non-default environments get a _<env> suffix
    #[arg(long, env = "GENCFG_TARGET")]
    pub target: Option<String>,

    /// Absolute path to the JSON descriptor (environments + tokenValueMap)
    #[arg(long, env = "GENCFG_PROPERTIES")]
    pub properties: Option<String>,

    /// Write each file to a temp file first and rename it into place on success
    #[arg(long, default_value_t = false)]
    pub atomic: bool,

    /// Only verify that every token resolves for every environment; write nothing
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Path to a task file (overrides GENCFG_CONFIG and ./gencfg.toml)
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Run only the named task(s) from the task file
    #[arg(long = "task")]
    pub tasks: Vec<String>,

    /// Print a report of generated files
    #[arg(long, value_enum, default_value_t = ReportMode::Off)]
    pub report: ReportMode,

    /// Write report to a file instead of stdout
    #[arg(long)]
    pub report_out: Option<std::path::PathBuf>,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// True when any of the three paths was given directly (flag or env).
    pub fn has_direct_paths(&self) -> bool {
        self.template.is_some() || self.target.is_some() || self.properties.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    Off,
    Summary,
    Full,
}
