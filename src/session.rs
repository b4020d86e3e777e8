use crate::cli::CommonArgs;
use crate::config::{Config, CONFIG_FILE};
use crate::error::{ArtError, Result};
use crate::git::{GitCli, GitRepo};
use crate::grid::CoordinateMapper;
use crate::journal::CommitJournal;
use anyhow::Context;
use chrono::NaiveDate;
use tracing::debug;

/// Everything one command needs: settings, reference date and the repository.
pub struct Session {
    pub config: Config,
    pub reference: NaiveDate,
    repo: Option<GitCli>,
}

impl Session {
    /// Resolve config and reference date. A missing repository is only an
    /// error once something asks for it.
    pub fn open(common: &CommonArgs) -> anyhow::Result<Self> {
        let workdir = GitRepo::open(common.repo.as_ref())
            .ok()
            .map(|repo| repo.path().to_path_buf());

        let mut config = match (&common.config, &workdir) {
            (Some(path), _) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            (None, Some(root)) => Config::load_or_default(root.join(CONFIG_FILE))
                .context("Failed to load repository config")?,
            (None, None) => Config::default(),
        };
        common.apply(&mut config);

        let repo = match GitCli::discover(common.repo.as_ref(), &config.git_binary) {
            Ok(repo) => Some(repo),
            Err(e) => {
                debug!(error = %e, "no usable repository");
                None
            }
        };

        let reference = resolve_reference(common.today, &config)?;
        Ok(Self { config, reference, repo })
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.reference, self.config.week_start)
    }

    pub fn require_repo(&mut self) -> Result<&mut GitCli> {
        self.repo.as_mut().ok_or_else(|| {
            ArtError::Precondition("not inside a git repository (use --repo)".to_string())
        })
    }

    pub fn journal(&self) -> Result<CommitJournal> {
        let repo = self.repo.as_ref().ok_or_else(|| {
            ArtError::Precondition("not inside a git repository (use --repo)".to_string())
        })?;
        Ok(CommitJournal::in_repo(repo.workdir(), &self.config.log_file))
    }

    pub fn repository_path(&self) -> String {
        self.repo
            .as_ref()
            .map(|repo| repo.workdir().to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

fn resolve_reference(requested: Option<NaiveDate>, config: &Config) -> Result<NaiveDate> {
    let today = config.today();
    match requested {
        Some(date) if date > today => Err(ArtError::FutureDate {
            date,
            reference: today,
        }),
        Some(date) => Ok(date),
        None => Ok(today),
    }
}
