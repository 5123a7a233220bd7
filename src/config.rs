use serde::Deserialize;

/// Environment variable holding a GitHub personal access token
pub const GH_PAT_ENV: &str = "GH_PAT";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub github: GithubConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub request_timeout_secs: u64,
    pub page_size: u32,
}

impl Config {
    /// Load configuration from defaults, an optional file and `RECLAIM_*` env vars
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .set_default("github.api_url", "https://api.github.com")?
            .set_default("github.request_timeout_secs", 30)?
            .set_default("github.page_size", 100)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("RECLAIM").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.github.api_url.trim().is_empty() {
            anyhow::bail!("github.api_url must not be empty");
        }
        if self.github.page_size == 0 || self.github.page_size > 100 {
            anyhow::bail!("github.page_size must be between 1 and 100");
        }
        Ok(())
    }

    /// Resolve the token: explicit flag, then `GH_PAT`, then the config file
    pub fn github_token(&self, flag: Option<&str>) -> anyhow::Result<String> {
        let from_env = std::env::var(GH_PAT_ENV).ok();
        pick_token(flag, from_env.as_deref(), self.github.token.as_deref())
            .ok_or_else(|| anyhow::anyhow!("No GitHub token: pass --github-pat or set {}", GH_PAT_ENV))
    }

    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.github.api_url.trim_end_matches('/'))
    }
}

fn pick_token(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> Option<String> {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}
