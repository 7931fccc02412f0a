use crate::ports::snapshot_store::{
    BookRecord, MemberRecord, Result, Snapshot, SnapshotStore as SnapshotStoreTrait,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the members store
pub const MEMBERS_FILE: &str = "members.json";

/// File name of the books store
pub const BOOKS_FILE: &str = "books.json";

/// JSON file implementation of SnapshotStore
///
/// Keeps two independent record arrays, `members.json` and `books.json`,
/// in a data directory. Both files are rewritten in full on every save,
/// members first. The two writes are not atomic as a pair.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    members_path: PathBuf,
    books_path: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            members_path: data_dir.join(MEMBERS_FILE),
            books_path: data_dir.join(BOOKS_FILE),
        }
    }

    pub fn members_path(&self) -> &Path {
        &self.members_path
    }

    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    /// Read one record array. `Ok(None)` when the file does not exist.
    fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let records = serde_json::from_str(&raw)?;
        Ok(Some(records))
    }

    fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl SnapshotStoreTrait for SnapshotStore {
    /// Neither file is parsed unless both exist, so a leftover file from a
    /// partial store never blocks first-run seeding.
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.members_path.try_exists()? || !self.books_path.try_exists()? {
            tracing::debug!(
                members = %self.members_path.display(),
                books = %self.books_path.display(),
                "Snapshot store absent"
            );
            return Ok(None);
        }

        let members: Option<Vec<MemberRecord>> = Self::read_records(&self.members_path)?;
        let books: Option<Vec<BookRecord>> = Self::read_records(&self.books_path)?;

        match (members, books) {
            (Some(members), Some(books)) => Ok(Some(Snapshot { members, books })),
            // removed between the existence check and the read
            _ => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        Self::write_records(&self.members_path, &snapshot.members)?;
        Self::write_records(&self.books_path, &snapshot.books)?;
        tracing::debug!(
            members = snapshot.members.len(),
            books = snapshot.books.len(),
            "Snapshot saved"
        );
        Ok(())
    }
}
