use clap::{Args, Parser, Subcommand, ValueEnum};
use crate::{
    error::{ReclaimError, Result},
    mannequin::ReclaimRequest,
};

#[derive(Parser)]
#[command(name = "mannequin-reclaim")]
#[command(about = "Reclaim mannequin users created by an organization migration into GitHub")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default")]
    pub config: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reclaim one mannequin, or many from a CSV manifest. An invite is sent
    /// and the target user has to accept it for the remapping to happen.
    ///
    /// The CSV needs a mannequin login column and a target login column; its
    /// first line is a header and is ignored. When --csv is given the
    /// single-mannequin options are ignored.
    Reclaim(ReclaimArgs),

    /// List the mannequins of an organization and their current mapping
    List {
        /// Organization to list mannequins for
        #[arg(long)]
        github_org: String,

        /// Only show mannequins with this login
        #[arg(long)]
        mannequin_user: Option<String>,

        /// Personal access token (defaults to GH_PAT)
        #[arg(long)]
        github_pat: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ReclaimArgs {
    /// Organization that owns the mannequins
    #[arg(long)]
    pub github_org: String,

    /// CSV manifest of mannequins to reclaim
    #[arg(long)]
    pub csv: Option<String>,

    /// Login of the mannequin to be remapped
    #[arg(long)]
    pub mannequin_user: Option<String>,

    /// Id of the mannequin, for when several mannequins share a login
    #[arg(long)]
    pub mannequin_id: Option<String>,

    /// Login of the user the mannequin is mapped to
    #[arg(long)]
    pub target_user: Option<String>,

    /// Map the mannequin even if it was previously mapped
    #[arg(long)]
    pub force: bool,

    /// Personal access token (defaults to GH_PAT)
    #[arg(long)]
    pub github_pat: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Exit non-zero when any manifest row fails
    #[arg(long)]
    pub fail_on_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Which workflow a `reclaim` invocation runs
#[derive(Debug, PartialEq)]
pub enum ReclaimMode {
    Manifest { path: String },
    Single(ReclaimRequest),
}

impl ReclaimArgs {
    /// Pick manifest or single mode. `--csv` wins over the single options.
    pub fn mode(&self) -> Result<ReclaimMode> {
        if let Some(path) = self.csv.as_deref().filter(|p| !p.trim().is_empty()) {
            return Ok(ReclaimMode::Manifest { path: path.to_string() });
        }

        let has_mannequin = self.mannequin_user.is_some() || self.mannequin_id.is_some();
        match (&self.target_user, has_mannequin) {
            (Some(target), true) => ReclaimRequest::new(
                self.mannequin_user.as_deref(),
                self.mannequin_id.as_deref(),
                target,
            )
            .map(ReclaimMode::Single),
            _ => Err(ReclaimError::InvalidRequest(
                "Either --csv or --mannequin-user and --target-user must be specified".to_string(),
            )),
        }
    }

    /// Whether single-request options were given alongside `--csv`
    pub fn has_ignored_single_options(&self) -> bool {
        self.csv.is_some()
            && (self.mannequin_user.is_some() || self.mannequin_id.is_some() || self.target_user.is_some())
    }
}
