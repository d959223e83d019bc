use crate::{cli, generate::GeneratedFile};

/// Files produced by one task (or by the single CLI invocation).
#[derive(Debug, Clone)]
pub struct TaskRun {
    pub name: String,
    pub files: Vec<GeneratedFile>,
}

pub fn build_report(runs: &[TaskRun], mode: cli::ReportMode) -> String {
    match mode {
        cli::ReportMode::Off => String::new(),
        cli::ReportMode::Summary => summary(runs),
        cli::ReportMode::Full => full(runs),
    }
}

fn summary(runs: &[TaskRun]) -> String {
    let mut out = String::new();

    out.push_str("gencfg report (summary)\n");
    out.push_str("=======================\n");

    let total: usize = runs.iter().map(|r| r.files.len()).sum();
    out.push_str(&format!("tasks: {} files: {}\n", runs.len(), total));

    for run in runs {
        out.push_str(&format!("  {}: {} file(s)\n", run.name, run.files.len()));
    }

    out
}

fn full(runs: &[TaskRun]) -> String {
    let mut out = summary(runs);

    for run in runs {
        out.push_str(&format!("\n{}\n", run.name));
        for f in &run.files {
            out.push_str(&format!(
                "  - env={} lines={} {}\n",
                env_label(&f.environment),
                f.lines,
                f.path.display()
            ));
        }
    }

    out
}

fn env_label(env: &str) -> &str {
    if env.is_empty() {
        "<default>"
    } else {
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn runs() -> Vec<TaskRun> {
        vec![TaskRun {
            name: "app".to_string(),
            files: vec![
                GeneratedFile {
                    environment: String::new(),
                    path: PathBuf::from("/out/app.properties"),
                    lines: 4,
                },
                GeneratedFile {
                    environment: "dev".to_string(),
                    path: PathBuf::from("/out/app_dev.properties"),
                    lines: 4,
                },
            ],
        }]
    }

    #[test]
    fn off_is_empty() {
        assert!(build_report(&runs(), cli::ReportMode::Off).is_empty());
    }

    #[test]
    fn summary_counts_files() {
        let r = build_report(&runs(), cli::ReportMode::Summary);
        assert!(r.contains("tasks: 1 files: 2"));
        assert!(r.contains("app: 2 file(s)"));
        assert!(!r.contains("app_dev.properties"));
    }

    #[test]
    fn full_lists_each_file() {
        let r = build_report(&runs(), cli::ReportMode::Full);
        assert!(r.contains("env=<default> lines=4 /out/app.properties"));
        assert!(r.contains("env=dev lines=4 /out/app_dev.properties"));
    }
}
