use std::sync::Arc;

use clap::Parser;
use colored::*;
use mannequin_reclaim::{
    cli::{Cli, Commands, OutputFormat, ReclaimArgs, ReclaimMode},
    error::{self, ReclaimError},
    github::GithubClient,
    mannequin::{IdentityService, MannequinIdentity},
    reclaim::{BatchSummary, ManifestParser, ReclaimOrchestrator},
    utils, Config,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "mannequin_reclaim=debug,info"
    } else {
        "mannequin_reclaim=info,warn"
    };
    // stdout carries only the report, so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Reclaim(args) => reclaim(&config, args).await,

        Commands::List { github_org, mannequin_user, github_pat, format } => {
            info!("Listing mannequins of {}", github_org);
            list_mannequins(&config, &github_org, mannequin_user.as_deref(), github_pat.as_deref(), format)
                .await
                .map(|_| true)
        }
    };

    match result {
        Ok(true) => {}
        // Already reported through the printed outcomes
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    }
}

fn connect(config: &Config, github_pat: Option<&str>) -> error::Result<Arc<dyn IdentityService>> {
    let token = config
        .github_token(github_pat)
        .map_err(|e| ReclaimError::Config(e.to_string()))?;
    Ok(Arc::new(GithubClient::new(config, token)?))
}

/// Run a reclaim. `Ok(false)` means the outcomes were printed but the
/// invocation should still exit non-zero.
async fn reclaim(config: &Config, args: ReclaimArgs) -> error::Result<bool> {
    let mode = args.mode()?;

    info!("GITHUB ORG: {}", args.github_org);
    if args.github_pat.is_some() {
        info!("GITHUB PAT: ***");
    }
    if args.force {
        info!("FORCE: mannequins that are already mapped will be reclaimed again");
    }

    match mode {
        ReclaimMode::Manifest { path } => {
            info!("Reclaiming mannequins with CSV...");
            info!("FILE: {}", path);
            if args.has_ignored_single_options() {
                warn!("--csv was given; --mannequin-user, --mannequin-id and --target-user are ignored");
            }

            let lines = utils::read_lines(&path)?;
            let orchestrator = ReclaimOrchestrator::new(connect(config, args.github_pat.as_deref())?);
            let summary = orchestrator
                .reclaim_manifest(ManifestParser::parse(lines), &args.github_org, args.force)
                .await;

            print_batch(&summary, args.format)?;

            if summary.exits_with_failure(args.fail_on_error) {
                warn!("{} of {} manifest rows failed", summary.failed, summary.total);
                return Ok(false);
            }
            Ok(true)
        }

        ReclaimMode::Single(request) => {
            info!("Reclaiming mannequin...");
            info!("MANNEQUIN: {}", request.mannequin_login().unwrap_or("-"));
            if let Some(id) = request.mannequin_id() {
                info!("MANNEQUIN ID: {}", id);
            }
            info!("RECLAIMING USER: {}", request.target_login());

            let orchestrator = ReclaimOrchestrator::new(connect(config, args.github_pat.as_deref())?);
            let outcome = orchestrator.reclaim_one(&request, &args.github_org, args.force).await;

            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                OutputFormat::Table => println!("{}", outcome.status_line()),
            }

            Ok(!outcome.is_failed())
        }
    }
}

fn print_batch(summary: &BatchSummary, format: OutputFormat) -> error::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => summary.print_summary(),
    }
    Ok(())
}

async fn list_mannequins(
    config: &Config,
    org: &str,
    login: Option<&str>,
    github_pat: Option<&str>,
    format: OutputFormat,
) -> error::Result<()> {
    let service = connect(config, github_pat)?;
    let mannequins: Vec<MannequinIdentity> = service
        .list_mannequins(org)
        .await
        .map_err(|e| ReclaimError::Remote(e.to_string()))?
        .into_iter()
        .filter(|m| login.map_or(true, |l| m.login.eq_ignore_ascii_case(l)))
        .collect();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&mannequins)?);
        return Ok(());
    }

    println!("{}", format!("=== Mannequins of {} ===", org).cyan().bold());
    utils::print_table_border(80);
    utils::print_table_row(&["Login", "Id", "Mapped To"], &[30, 30, 16]);
    utils::print_table_border(80);
    for m in &mannequins {
        utils::print_table_row(
            &[
                &m.login,
                &utils::format_id(&m.id),
                &utils::format_mapping(
                    m.already_mapped_target_login.as_deref(),
                    m.already_mapped_target_id.as_deref(),
                    16,
                ),
            ],
            &[30, 30, 16],
        );
    }
    utils::print_table_border(80);
    println!("Total: {}", mannequins.len());
    Ok(())
}
