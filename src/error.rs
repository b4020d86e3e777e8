use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArtError>;

#[derive(Error, Debug)]
pub enum ArtError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Precondition failed: {0}")]
    Precondition(String),
    #[error("`{command}` failed ({}): {stderr}", exit_label(.code))]
    ExternalTool {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("Date {date} is after the reference date {reference}")]
    FutureDate { date: NaiveDate, reference: NaiveDate },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Journal error: {0}")]
    Journal(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl ArtError {
    /// Errors that make every further commit attempt pointless.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ArtError::Precondition(_))
    }
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for ArtError {
    fn from(err: gix::open::Error) -> Self {
        ArtError::Git(Box::new(err))
    }
}

impl From<gix::discover::Error> for ArtError {
    fn from(err: gix::discover::Error) -> Self {
        ArtError::GitDiscover(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for ArtError {
    fn from(err: gix::object::commit::Error) -> Self {
        ArtError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for ArtError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        ArtError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for ArtError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        ArtError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for ArtError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        ArtError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for ArtError {
    fn from(err: gix::objs::decode::Error) -> Self {
        ArtError::ObjectDecode(Box::new(err))
    }
}
