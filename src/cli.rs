use crate::config::{Config, Timezone};
use crate::grid::WeekStart;
use crate::pattern::{FillSettings, PatternSource, Shape};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "commitart")]
#[command(about = "Paint patterns onto a git contribution graph with backdated commits")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to a commitart.toml settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_name = "YYYY-MM-DD", help = "Reference date for the graph (default: today)")]
    pub today: Option<NaiveDate>,

    #[arg(long, global = true, value_enum, help = "First day of the graph's week")]
    pub week_start: Option<WeekStart>,

    #[arg(long, global = true, value_enum, help = "Timezone for commit timestamps")]
    pub timezone: Option<Timezone>,

    #[arg(long, global = true, help = "Journal file name inside the repository")]
    pub log_file: Option<String>,

    #[arg(long, global = true, help = "Pause between commits (e.g. 50ms)")]
    pub pause: Option<String>,

    #[arg(long, global = true, value_name = "PATH", help = "git executable to run")]
    pub git: Option<String>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "More log output (repeatable)")]
    pub verbose: u8,
}

impl CommonArgs {
    /// Command line flags override whatever the settings file said.
    pub fn apply(&self, config: &mut Config) {
        if let Some(week_start) = self.week_start {
            config.week_start = week_start;
        }
        if let Some(timezone) = self.timezone {
            config.timezone = timezone;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }
        if let Some(pause) = &self.pause {
            config.pause = Some(pause.clone());
        }
        if let Some(git) = &self.git {
            config.git_binary = git.clone();
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    #[arg(long, help = "Show the planned commits without creating them")]
    pub dry_run: bool,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Args, Clone, Debug)]
pub struct PatternArgs {
    #[arg(long, default_value_t = 1, help = "Multiply every cell by this factor")]
    pub intensity: u32,

    #[arg(long, help = "First week column (default: centered text and shapes, else 0)")]
    pub offset: Option<usize>,

    #[arg(long, value_name = "FILE", help = "Also write the final pattern as JSON")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write text in a 5x7 pixel font
    Text {
        text: String,

        #[command(flatten)]
        args: PatternArgs,
    },
    /// Draw a built-in shape
    Shape {
        #[arg(value_enum)]
        shape: Shape,

        #[arg(long, help = "Repeat the shape across the whole graph")]
        tile: bool,

        #[command(flatten)]
        args: PatternArgs,
    },
    /// Paint a hand-drawn grid (`-` reads stdin)
    Grid {
        file: PathBuf,

        #[command(flatten)]
        args: PatternArgs,
    },
    /// Paint a JSON `[day][week]` array (`-` reads stdin)
    Import {
        file: PathBuf,

        #[command(flatten)]
        args: PatternArgs,
    },
    /// Scatter commits over random cells
    Random {
        #[arg(long, default_value_t = 100, help = "Number of commits to scatter")]
        count: u32,

        #[arg(long, help = "Seed for a reproducible pattern")]
        seed: Option<u64>,

        #[command(flatten)]
        args: PatternArgs,
    },
    /// Give every cell a random commit count
    Fill {
        #[arg(long, default_value_t = 0)]
        min_commits: u32,

        #[arg(long, default_value_t = 3)]
        max_commits: u32,

        #[arg(long, default_value_t = 0.7, help = "Chance that a cell is painted at all")]
        frequency: f64,

        #[arg(long, help = "Seed for a reproducible pattern")]
        seed: Option<u64>,

        #[command(flatten)]
        args: PatternArgs,
    },
    /// Commit to a single grid cell
    Commit {
        #[arg(help = "Week column, 0 is the oldest")]
        week: u32,

        #[arg(help = "Day row, 0 is the first day of the week")]
        day: u32,

        #[arg(long, default_value_t = 1)]
        count: u32,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Commit once for the day before the reference date
    Yesterday {
        #[arg(long, default_value_t = 1)]
        count: u32,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Show journaled commits and repository totals
    List {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Hard reset the branch to before the first generated commit
    Revert {
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let common = self.common;
        match self.command {
            Commands::Text { text, args } => crate::paint::exec(common, PatternSource::Text(text), args),
            Commands::Shape { shape, tile, args } => {
                crate::paint::exec(common, PatternSource::Shape { shape, tile }, args)
            }
            Commands::Grid { file, args } => {
                let input = read_input(&file)?;
                crate::paint::exec(common, PatternSource::Grid(input), args)
            }
            Commands::Import { file, args } => {
                let input = read_input(&file)?;
                crate::paint::exec(common, PatternSource::Json(input), args)
            }
            Commands::Random { count, seed, args } => {
                crate::paint::exec(common, PatternSource::Scatter { count, seed }, args)
            }
            Commands::Fill { min_commits, max_commits, frequency, seed, args } => {
                let settings = FillSettings { min_commits, max_commits, frequency };
                crate::paint::exec(common, PatternSource::Fill { settings, seed }, args)
            }
            Commands::Commit { week, day, count, run } => {
                crate::paint::exec_cell(common, week, day, count, run)
            }
            Commands::Yesterday { count, run } => crate::paint::exec_yesterday(common, count, run),
            Commands::List { json, ndjson } => crate::list::exec(common, json, ndjson),
            Commands::Revert { yes, json } => crate::revert::exec(common, yes, json),
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read pattern from stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
