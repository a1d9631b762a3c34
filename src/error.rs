use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatError>;

#[derive(Error, Debug)]
pub enum StatError {
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
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
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for StatError {
    fn from(err: gix::open::Error) -> Self {
        StatError::Git(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for StatError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        StatError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for StatError {
    fn from(err: gix::object::commit::Error) -> Self {
        StatError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for StatError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        StatError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for StatError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        StatError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for StatError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        StatError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for StatError {
    fn from(err: gix::objs::decode::Error) -> Self {
        StatError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for StatError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        StatError::DiffTreeToTree(Box::new(err))
    }
}

/// Problems with the input JSON. Each variant names the offending path or key.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },
    #[error("Could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not a valid json file: {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Missing json key: '{key}'")]
    MissingKey { key: &'static str },
    #[error("Invalid kudos pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Could not execute gnuplot: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Could not talk to gnuplot: {0}")]
    Io(#[from] std::io::Error),
    #[error("gnuplot reported: {0}")]
    Stderr(String),
}
