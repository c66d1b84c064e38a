use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitver::cli::{run_label, run_version, ResolveArgs, WorkflowResult};
use gitver::config::BehaviorConfig;
use gitver::env::ProcessEnvironment;
use gitver::ui;

#[derive(Parser)]
#[command(
    name = "gitver",
    version,
    about = "Derive a semantic version from git tags and commit messages"
)]
struct Args {
    #[arg(short, long, help = "Path inside the git repository [default: .]")]
    path: Option<PathBuf>,

    #[arg(short, long, help = "Custom settings file path")]
    settings: Option<PathBuf>,

    #[arg(long, help = "Strip a leading feature- or hotfix- from branch labels")]
    trim_branch_prefix: bool,

    #[arg(long, help = "Fail when the branch version is lower than master's")]
    forbid_behind_master: bool,

    #[arg(long, help = "Ignore CI environment variables")]
    ignore_env: bool,

    #[arg(short, long, help = "Log the version walk to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the pre-release label for the current branch (empty on master)
    Label,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gitver=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let resolve_args = ResolveArgs {
        path: args.path,
        settings_path: args.settings,
        behavior: BehaviorConfig {
            forbid_behind_master: args.forbid_behind_master,
            trim_branch_prefix: args.trim_branch_prefix,
            ignore_env_vars: args.ignore_env,
        },
    };

    let env = ProcessEnvironment;
    let outcome = match args.command {
        Some(Command::Label) => run_label(&resolve_args, &env),
        None => run_version(&resolve_args, &env),
    };

    let WorkflowResult { output, warnings } = match outcome {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_result(&output);

    Ok(())
}
