use crate::error::{Result, StatError};
use crate::model::{CommitRecord, FileStats};
use chrono::{DateTime, Utc};
use gix::object::tree::diff::ChangeDetached;
use gix::objs::tree::EntryMode;
use gix::{ObjectId, Repository};
use similar::{ChangeTag, TextDiff};
use std::collections::{BinaryHeap, HashSet};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the work tree at `path`. Bare repositories are rejected.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = gix::open(path.as_ref())?;
        let path = repo
            .workdir()
            .ok_or_else(|| {
                StatError::GitRepo(format!(
                    "{} has no working tree",
                    path.as_ref().display()
                ))
            })?
            .to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits reachable from HEAD, newest committer time first.
    ///
    /// Per-file line statistics against the first parent are only computed when
    /// `with_diffs` is set. An unborn HEAD yields an empty walk.
    pub fn history(&self, with_diffs: bool) -> Result<HistoryWalk<'_>> {
        let mut walk = HistoryWalk {
            repo: self,
            queue: BinaryHeap::new(),
            seen: HashSet::new(),
            with_diffs,
        };

        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(walk);
        }
        let head_commit = head.peel_to_commit_in_place()?;
        walk.enqueue(head_commit.id)?;
        Ok(walk)
    }

    fn commit_time(&self, id: ObjectId) -> Result<i64> {
        Ok(self.repo.find_commit(id)?.time()?.seconds)
    }

    fn read_commit(&self, id: ObjectId, with_diffs: bool) -> Result<(CommitRecord, Vec<ObjectId>)> {
        let commit = self.repo.find_commit(id)?;
        let secs = commit.time()?.seconds;
        let timestamp = DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| StatError::InvalidDate(format!("Invalid timestamp: {secs}")))?;
        let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

        let author = commit.author()?;
        let message = commit.message()?;

        let files = if with_diffs {
            self.diff_stats(id, parents.first().copied())?
        } else {
            Vec::new()
        };

        let record = CommitRecord {
            id: id.to_string(),
            author_name: author.name.to_string(),
            message: message.title.to_string(),
            timestamp,
            files,
        };
        Ok((record, parents))
    }

    fn diff_stats(&self, commit_id: ObjectId, parent_id: Option<ObjectId>) -> Result<Vec<FileStats>> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let changes: Vec<ChangeDetached> = match parent_id {
            Some(parent_id) => {
                let parent_tree = self.repo.find_commit(parent_id)?.tree()?;
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?
            }
            None => self.repo.diff_tree_to_tree(None, Some(&commit_tree), None)?,
        };

        let mut files = Vec::new();
        for change in changes {
            self.handle_change(change, &mut files)?;
        }
        Ok(files)
    }

    /// Text of a blob entry, or `None` for entries without file content in this
    /// repository (trees, submodule commits).
    fn entry_blob(&self, id: ObjectId, mode: EntryMode) -> Result<Option<BlobText>> {
        if !mode.is_blob_or_symlink() {
            return Ok(None);
        }
        let obj = self.repo.find_object(id)?;
        Ok(Some(BlobText::from_bytes(obj.data.as_slice())))
    }

    fn handle_change(&self, change: ChangeDetached, files: &mut Vec<FileStats>) -> Result<()> {
        match change {
            ChangeDetached::Addition {
                id,
                location,
                entry_mode,
                ..
            } => {
                let Some(new) = self.entry_blob(id, entry_mode)? else {
                    return Ok(());
                };
                files.push(FileStats {
                    path: location.to_string(),
                    added_lines: new.line_count(),
                    deleted_lines: 0,
                    is_binary: new.is_binary,
                    is_new: true,
                });
            }
            ChangeDetached::Deletion {
                id,
                location,
                entry_mode,
                ..
            } => {
                let Some(old) = self.entry_blob(id, entry_mode)? else {
                    return Ok(());
                };
                files.push(FileStats {
                    path: location.to_string(),
                    added_lines: 0,
                    deleted_lines: old.line_count(),
                    is_binary: old.is_binary,
                    is_new: false,
                });
            }
            ChangeDetached::Modification {
                previous_id,
                previous_entry_mode,
                id,
                entry_mode,
                location,
                ..
            } => {
                // A type change (file <-> submodule) keeps only the blob side.
                let old = self.entry_blob(previous_id, previous_entry_mode)?;
                let new = self.entry_blob(id, entry_mode)?;
                if old.is_none() && new.is_none() {
                    return Ok(());
                }
                let old = old.unwrap_or_default();
                let new = new.unwrap_or_default();
                let is_binary = old.is_binary || new.is_binary;
                let (added, deleted) = if is_binary {
                    (0, 0)
                } else {
                    count_changed_lines(&old.text, &new.text)
                };
                files.push(FileStats {
                    path: location.to_string(),
                    added_lines: added,
                    deleted_lines: deleted,
                    is_binary,
                    is_new: false,
                });
            }
            ChangeDetached::Rewrite {
                source_id,
                source_entry_mode,
                id,
                entry_mode,
                location,
                copy,
                ..
            } => {
                let Some(new) = self.entry_blob(id, entry_mode)? else {
                    return Ok(());
                };
                let old = self
                    .entry_blob(source_id, source_entry_mode)?
                    .unwrap_or_default();
                let is_binary = old.is_binary || new.is_binary;
                // A copy leaves its source in place, so the destination is a new file.
                let (added, deleted) = match (is_binary, copy) {
                    (true, _) => (0, 0),
                    (false, true) => (new.line_count(), 0),
                    (false, false) => count_changed_lines(&old.text, &new.text),
                };
                files.push(FileStats {
                    path: location.to_string(),
                    added_lines: added,
                    deleted_lines: deleted,
                    is_binary,
                    is_new: copy,
                });
            }
        }
        Ok(())
    }
}

/// Lazy, newest-first walk over the commit graph. Each commit is yielded once.
pub struct HistoryWalk<'r> {
    repo: &'r GitRepo,
    queue: BinaryHeap<(i64, ObjectId)>,
    seen: HashSet<ObjectId>,
    with_diffs: bool,
}

impl HistoryWalk<'_> {
    fn enqueue(&mut self, id: ObjectId) -> Result<()> {
        if self.seen.insert(id) {
            let secs = self.repo.commit_time(id)?;
            self.queue.push((secs, id));
        }
        Ok(())
    }

    fn visit(&mut self, id: ObjectId) -> Result<CommitRecord> {
        let (record, parents) = self.repo.read_commit(id, self.with_diffs)?;
        for parent in parents {
            self.enqueue(parent)?;
        }
        Ok(record)
    }
}

impl Iterator for HistoryWalk<'_> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, id) = self.queue.pop()?;
        Some(self.visit(id))
    }
}

/// Blob content decoded for line counting. Invalid UTF-8 is replaced, not dropped.
#[derive(Debug, Default)]
struct BlobText {
    text: String,
    is_binary: bool,
}

impl BlobText {
    fn from_bytes(data: &[u8]) -> Self {
        let is_binary = data.iter().take(8192).any(|&b| b == 0);
        let text = if is_binary {
            String::new()
        } else {
            String::from_utf8_lossy(data).into_owned()
        };
        Self { text, is_binary }
    }

    fn line_count(&self) -> u32 {
        self.text.lines().count() as u32
    }
}

/// Added and deleted line counts between two texts.
pub(crate) fn count_changed_lines(old_text: &str, new_text: &str) -> (u32, u32) {
    let diff = TextDiff::from_lines(old_text, new_text);
    let mut added = 0u32;
    let mut deleted = 0u32;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}
