//! Command-line surface
//!
//! Usage:
//!   wiki-edits users --manual "Jimbo Wales" --format json
//!   wiki-edits users --min-edits 100 --user-count 3 --consolidated
//!   wiki-edits articles "Barack Obama" "Joe Biden" --edit-limit 1000
//!
//! Options:
//!   --config <path>    Read settings from a JSON config file
//!   --json             Print the run summary as JSON
//!   -v, --verbose      More logging (repeatable)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use wiki_edits_core::{
    Config, ExportFormat, HttpClient, RunEngine, RunOptions, RunPreset, RunProgress, RunState,
    Subject, SubjectPhase, SummaryOptions, WikiClient, POLITICAL_FIGURES,
};

/// Fetch wiki edit histories and export per-editor statistics
#[derive(Debug, Parser)]
#[command(name = "wiki-edits", version, about)]
pub struct Cli {
    /// JSON config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the run summary as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export recent contributions of active users
    Users(UsersArgs),
    /// Export full revision histories of articles and rank their editors
    Articles(ArticlesArgs),
}

#[derive(Debug, Args)]
pub struct UsersArgs {
    /// Specific username to query (skips auto-discovery)
    #[arg(long)]
    pub manual: Option<String>,

    /// Minimum edits for auto-discovered users
    #[arg(long, default_value_t = 50)]
    pub min_edits: u64,

    /// Number of users to auto-discover
    #[arg(long, default_value_t = 5)]
    pub user_count: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ArticlesArgs {
    /// Article titles (defaults to a list of political figures)
    pub titles: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Maximum number of edits to retrieve per subject
    #[arg(long)]
    pub edit_limit: Option<usize>,

    /// Directory to store output files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Export format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Also write one report covering all subjects
    #[arg(long)]
    pub consolidated: bool,

    /// Write the combined edit counts to this file inside the output directory
    #[arg(long)]
    pub summary_file: Option<String>,

    /// Number of top editors to print
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Txt,
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => ExportFormat::Txt,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Run CLI command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let (preset, output) = match &cli.command {
        Command::Users(args) => (RunPreset::UserContributions, &args.output),
        Command::Articles(args) => (RunPreset::ArticleHistory, &args.output),
    };
    apply_overrides(&mut config, output);
    config.validate()?;
    let output_dir = config.prepare_output_dir()?;
    if !cli.json {
        println!("Output directory: {}", output_dir.display());
    }

    let client = WikiClient::from_config(&config)?;

    let subjects = match &cli.command {
        Command::Users(args) => match discover_users(&client, args, cli.json)? {
            Some(subjects) => subjects,
            None => return Ok(()),
        },
        Command::Articles(args) => article_subjects(args),
    };

    let options = build_options(preset, &config, output);
    let format = options.format;
    let summary_label = options.summary.as_ref().map(|s| s.label.clone());

    let mut engine = RunEngine::new(client, options);
    if !cli.json {
        engine = engine.with_progress_callback(Box::new(print_progress));
    }
    let state = engine.run(&subjects)?;

    if cli.json {
        print_json(&state, preset, summary_label.as_deref(), output.top)?;
    } else {
        print_export_summary(&state, format, &output_dir);
        print_top_editors(&state, output.top);
    }

    Ok(())
}

/// Flags win over config file values
fn apply_overrides(config: &mut Config, output: &OutputArgs) {
    if let Some(dir) = &output.output_dir {
        config.output_dir = dir.clone();
    }
}

fn build_options(preset: RunPreset, config: &Config, output: &OutputArgs) -> RunOptions {
    let mut options = preset.options(config);
    if let Some(format) = output.format {
        options.format = format.into();
    }
    if output.edit_limit.is_some() {
        options.fetch.cap = output.edit_limit;
    }
    options.consolidated = output.consolidated;
    if let Some(file_name) = &output.summary_file {
        let label = options
            .summary
            .as_ref()
            .map_or_else(|| "Selected Users".to_string(), |s| s.label.clone());
        options.summary = Some(SummaryOptions {
            file_name: file_name.clone(),
            label,
        });
    }
    options
}

fn article_subjects(args: &ArticlesArgs) -> Vec<Subject> {
    if args.titles.is_empty() {
        RunPreset::ArticleHistory.subjects(POLITICAL_FIGURES)
    } else {
        RunPreset::ArticleHistory.subjects(args.titles.iter().cloned())
    }
}

/// Manual user or auto-discovered active users; `None` when nobody matched.
///
/// A failed discovery request is logged and treated like an empty result.
fn discover_users<H: HttpClient>(
    client: &WikiClient<H>,
    args: &UsersArgs,
    quiet: bool,
) -> anyhow::Result<Option<Vec<Subject>>> {
    if let Some(name) = &args.manual {
        return Ok(Some(RunPreset::UserContributions.subjects([name.clone()])));
    }

    if !quiet {
        println!(
            "Finding {} active Wikipedia users with at least {} edits...",
            args.user_count, args.min_edits
        );
    }
    let users = match client.find_active_users(args.min_edits, args.user_count) {
        Ok(users) => users,
        Err(e) if e.is_fetch_error() => {
            tracing::warn!(error = %e, "User discovery failed");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };
    if users.is_empty() {
        if !quiet {
            println!("No users found matching the criteria.");
        }
        return Ok(None);
    }

    if !quiet {
        println!("Found {} active users:", users.len());
        for user in &users {
            println!("- {} ({} edits)", user.name, user.edit_count);
        }
    }
    Ok(Some(
        RunPreset::UserContributions.subjects(users.into_iter().map(|u| u.name)),
    ))
}

fn print_progress(progress: RunProgress) {
    match progress.phase {
        SubjectPhase::Fetching => eprintln!(
            "[{}/{}] Fetching edit history for {}...",
            progress.current, progress.total, progress.subject
        ),
        SubjectPhase::Skipped => eprintln!("No edits found for {}", progress.subject),
        _ => {}
    }
}

fn print_export_summary(state: &RunState, format: ExportFormat, output_dir: &std::path::Path) {
    let shown_dir = output_dir
        .canonicalize()
        .unwrap_or_else(|_| output_dir.to_path_buf());

    println!();
    println!("=== EXPORT SUMMARY ===");
    println!("Format: {}", format);
    println!("Output directory: {}", shown_dir.display());
    println!("Subjects analyzed: {}", state.reports.len());
    for report in &state.reports {
        let partial = if report.stop.is_partial() { " (partial)" } else { "" };
        println!("- {}: {} edits exported{}", report.subject, report.edits, partial);
    }
    if let Some(path) = &state.consolidated_path {
        println!("Consolidated report saved to {}", path.display());
    }
    if let Some(path) = &state.summary_path {
        println!("Combined edit counts saved to {}", path.display());
    }
    if !state.is_success() {
        for failure in &state.failures {
            println!("Warning: {}: {}", failure.target, failure.message);
        }
    }
}

fn print_top_editors(state: &RunState, top: usize) {
    if state.counter.is_empty() {
        return;
    }
    println!();
    println!("Top {} editors across all subjects:", top);
    for entry in state.counter.top(top) {
        println!("{}: {}", entry.editor, entry.edits);
    }
    println!();
    println!("Total unique editors: {}", state.counter.unique_editors());
    println!("Total edits across all subjects: {}", state.counter.total());
}

fn print_json(
    state: &RunState,
    preset: RunPreset,
    label: Option<&str>,
    top: usize,
) -> anyhow::Result<()> {
    let summary = state.summary(label.unwrap_or("Selected Users"), preset.kind());
    let reports: Vec<_> = state
        .reports
        .iter()
        .map(|r| {
            serde_json::json!({
                "subject": r.subject.name(),
                "edits": r.edits,
                "pages": r.pages,
                "stop": r.stop.to_string(),
                "phase": r.phase.to_string(),
                "output": r.output.as_ref().map(|p| p.to_string_lossy()),
            })
        })
        .collect();
    let failures: Vec<_> = state
        .failures
        .iter()
        .map(|f| serde_json::json!({ "target": f.target, "message": f.message }))
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "subjects": reports,
            "unique_editors": summary.unique_editors,
            "total_edits": summary.total_edits,
            "top_editors": summary.top(top),
            "consolidated_report": state.consolidated_path.as_ref().map(|p| p.to_string_lossy()),
            "summary_file": state.summary_path.as_ref().map(|p| p.to_string_lossy()),
            "failures": failures,
        }))?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiki_edits_core::Error;

    /// Transport that fails every request
    struct Unreachable;

    impl HttpClient for Unreachable {
        fn get(&self, url: &str, _query: &[(String, String)]) -> wiki_edits_core::Result<String> {
            Err(Error::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    /// Transport that always answers with `body`
    struct Canned(&'static str);

    impl HttpClient for Canned {
        fn get(&self, _url: &str, _query: &[(String, String)]) -> wiki_edits_core::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wiki-edits").chain(args.iter().copied())).unwrap()
    }

    fn output_of(cli: &Cli) -> &OutputArgs {
        match &cli.command {
            Command::Users(args) => &args.output,
            Command::Articles(args) => &args.output,
        }
    }

    #[test]
    fn test_users_defaults() {
        let cli = parse(&["users"]);
        let Command::Users(args) = &cli.command else {
            panic!("expected users command");
        };
        assert_eq!(args.min_edits, 50);
        assert_eq!(args.user_count, 5);
        assert!(args.manual.is_none());
        assert_eq!(args.output.top, 20);

        let options = build_options(RunPreset::UserContributions, &Config::default(), &args.output);
        assert_eq!(options.format, ExportFormat::Csv);
        assert_eq!(options.fetch.cap, Some(50));
        assert!(!options.consolidated);
        assert!(options.summary.is_none());
    }

    #[test]
    fn test_users_flags() {
        let cli = parse(&[
            "users", "--manual", "Jimbo Wales", "--edit-limit", "10", "--format", "json",
            "--consolidated", "--output-dir", "out", "--json",
        ]);
        assert!(cli.json);
        let Command::Users(args) = &cli.command else {
            panic!("expected users command");
        };
        assert_eq!(args.manual.as_deref(), Some("Jimbo Wales"));

        let mut config = Config::default();
        apply_overrides(&mut config, &args.output);
        assert_eq!(config.output_dir, PathBuf::from("out"));

        let options = build_options(RunPreset::UserContributions, &config, &args.output);
        assert_eq!(options.format, ExportFormat::Json);
        assert_eq!(options.fetch.cap, Some(10));
        assert!(options.consolidated);
        assert_eq!(options.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_articles_default_titles() {
        let cli = parse(&["articles"]);
        let Command::Articles(args) = &cli.command else {
            panic!("expected articles command");
        };
        let subjects = article_subjects(args);
        assert_eq!(subjects.len(), POLITICAL_FIGURES.len());
        assert_eq!(subjects[0], Subject::Article("Barack Obama".to_string()));

        let options = build_options(RunPreset::ArticleHistory, &Config::default(), output_of(&cli));
        assert_eq!(options.fetch.cap, None);
        assert_eq!(
            options.summary.map(|s| s.file_name).as_deref(),
            Some("political_figures_edit_counts.txt")
        );
    }

    #[test]
    fn test_summary_file_for_users() {
        let cli = parse(&["users", "--summary-file", "users_counts.txt"]);
        let options = build_options(RunPreset::UserContributions, &Config::default(), output_of(&cli));
        let summary = options.summary.unwrap();
        assert_eq!(summary.file_name, "users_counts.txt");
        assert_eq!(summary.label, "Selected Users");
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from(["wiki-edits", "users", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_discovery_failure_is_not_fatal() {
        let cli = parse(&["users", "--json"]);
        let Command::Users(args) = &cli.command else {
            panic!("expected users command");
        };
        let client = WikiClient::with_http(Unreachable, "https://example.org/w/api.php");
        let subjects = discover_users(&client, args, true).unwrap();
        assert!(subjects.is_none());
    }

    #[test]
    fn test_discovered_users_become_subjects() {
        let cli = parse(&["users", "--user-count", "2"]);
        let Command::Users(args) = &cli.command else {
            panic!("expected users command");
        };
        let body = r#"{ "query": { "allusers": [
            { "userid": 1, "name": "Alice", "editcount": 120 },
            { "userid": 2, "name": "Bob", "editcount": 75 }
        ] } }"#;
        let client = WikiClient::with_http(Canned(body), "https://example.org/w/api.php");
        let subjects = discover_users(&client, args, true).unwrap().unwrap();
        assert_eq!(
            subjects,
            vec![Subject::User("Alice".to_string()), Subject::User("Bob".to_string())]
        );
    }

    #[test]
    fn test_output_dir_flag_is_created() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("exports");
        let out_arg = out.to_string_lossy().into_owned();
        let cli = parse(&["articles", "Rust", "--output-dir", &out_arg, "--format", "txt"]);

        let mut config = Config::default();
        apply_overrides(&mut config, output_of(&cli));
        let prepared = config.prepare_output_dir().unwrap();
        assert!(prepared.is_dir());

        let options = build_options(RunPreset::ArticleHistory, &config, output_of(&cli));
        assert_eq!(options.output_dir, out);
        assert_eq!(options.format, ExportFormat::Txt);
    }
}
