use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::models::review::Review;
use crate::models::university::University;
use crate::models::user::UserRecord;

/// WAL operation types
///
/// One JSON object per line, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "doc", rename_all = "snake_case")]
pub enum WalOperation {
    InsertUser(UserRecord),
    InsertReview(Review),
    /// Insert or replace by id; used for catalog seeding and rating aggregates
    UpsertUniversity(University),
}

impl WalOperation {
    fn to_line(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to encode WAL operation")
    }

    fn from_line(line: &str) -> Result<Self> {
        serde_json::from_str(line).context("Failed to decode WAL operation")
    }
}

pub struct Wal {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl Wal {
    pub fn new(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open WAL file")?;

        Ok(Wal {
            file: Arc::new(Mutex::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn log_operation(&self, op: &WalOperation) -> Result<()> {
        let line = op.to_line()?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow!("WAL lock poisoned"))?;
        writeln!(file, "{}", line).context("Failed to write to WAL")?;
        file.flush().context("Failed to flush WAL")?;
        Ok(())
    }

    pub fn replay(&self) -> Result<Vec<WalOperation>> {
        let file = File::open(&self.path).context("Failed to open WAL for replay")?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.context("Failed to read line from WAL")?;
            let line = line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            match WalOperation::from_line(line) {
                Ok(op) => operations.push(op),
                Err(e) => {
                    tracing::warn!(
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse WAL line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::fs;
    use tempfile::TempDir;

    fn user() -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: "aaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
            username: "johndoe1".to_string(),
            email: "j@x.com".to_string(),
            password_hash: "hash".to_string(),
            initials: "J".to_string(),
            avatar: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn university() -> University {
        University {
            id: "bbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
            slug: "state-university".to_string(),
            title: "State University".to_string(),
            location: "Springfield".to_string(),
            description: String::new(),
            logo: String::new(),
            overall_rating: 0.0,
            education_rating: 0.0,
            facility_rating: 0.0,
            social_rating: 0.0,
            admin_rating: 0.0,
            total_ratings: 0,
        }
    }

    #[test]
    fn test_wal_line_is_tagged_json() {
        let line = WalOperation::UpsertUniversity(university()).to_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["op"], "upsert_university");
        assert_eq!(value["doc"]["slug"], "state-university");
    }

    #[test]
    fn test_wal_log_and_replay() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.wal");

        let wal = Wal::new(wal_path).unwrap();
        let user = user();

        wal.log_operation(&WalOperation::InsertUser(user.clone())).unwrap();
        wal.log_operation(&WalOperation::UpsertUniversity(university())).unwrap();

        let operations = wal.replay().unwrap();
        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0], WalOperation::InsertUser(user));
        assert_eq!(operations[1], WalOperation::UpsertUniversity(university()));
    }

    #[test]
    fn test_wal_invalid_lines() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.wal");

        let valid = WalOperation::UpsertUniversity(university()).to_line().unwrap();
        fs::write(&wal_path, format!("{{\"op\":\"bogus\"}}\nnot json\n\n{}\n", valid)).unwrap();

        let wal = Wal::new(wal_path).unwrap();
        let operations = wal.replay().unwrap();

        // Should skip invalid lines and parse the valid one
        assert_eq!(operations.len(), 1);
    }
}
