//! Typed collections over a `KeyValueStore`.
//!
//! Each collection is one JSON array under a fixed key. Every mutation is a
//! read-modify-write of that array, so mutations are serialized through one
//! async mutex; reads go straight to the store.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{KeyValueStore, StorageError};
use crate::models::job::{JobDescription, JobMatch};
use crate::models::resume::Resume;

pub const RESUMES_KEY: &str = "resumes";
pub const JOBS_KEY: &str = "jobDescriptions";
pub const MATCHES_KEY: &str = "jobMatches";

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Repository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    async fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match self.store.load(key).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        self.store.save(key, serde_json::to_value(items)?).await?;
        debug!("Saved {} records under '{key}'", items.len());
        Ok(())
    }

    // ── Resumes ─────────────────────────────────────────────────────────────

    pub async fn list_resumes(&self) -> Result<Vec<Resume>, StorageError> {
        self.load_list(RESUMES_KEY).await
    }

    pub async fn get_resume(&self, id: &str) -> Result<Option<Resume>, StorageError> {
        Ok(self.list_resumes().await?.into_iter().find(|r| r.id == id))
    }

    pub async fn add_resume(&self, resume: Resume) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut resumes: Vec<Resume> = self.load_list(RESUMES_KEY).await?;
        info!("Storing resume {} ({})", resume.id, resume.file_name);
        resumes.push(resume);
        self.save_list(RESUMES_KEY, &resumes).await
    }

    /// Replaces the stored resume with the same id. Returns false if there is none.
    pub async fn replace_resume(&self, resume: Resume) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut resumes: Vec<Resume> = self.load_list(RESUMES_KEY).await?;
        let Some(slot) = resumes.iter_mut().find(|r| r.id == resume.id) else {
            return Ok(false);
        };
        *slot = resume;
        self.save_list(RESUMES_KEY, &resumes).await?;
        Ok(true)
    }

    /// Removes a resume and every match computed for it.
    pub async fn remove_resume(&self, id: &str) -> Result<Option<Resume>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut resumes: Vec<Resume> = self.load_list(RESUMES_KEY).await?;
        let Some(pos) = resumes.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        let removed = resumes.remove(pos);

        // No match may outlive its resume.
        let mut matches: Vec<JobMatch> = self.load_list(MATCHES_KEY).await?;
        matches.retain(|m| m.resume_id != id);
        self.save_list(MATCHES_KEY, &matches).await?;
        self.save_list(RESUMES_KEY, &resumes).await?;

        info!("Removed resume {id}");
        Ok(Some(removed))
    }

    // ── Job descriptions ────────────────────────────────────────────────────

    pub async fn list_jobs(&self) -> Result<Vec<JobDescription>, StorageError> {
        self.load_list(JOBS_KEY).await
    }

    pub async fn get_job(&self, id: &str) -> Result<Option<JobDescription>, StorageError> {
        Ok(self.list_jobs().await?.into_iter().find(|j| j.id == id))
    }

    pub async fn add_job(&self, job: JobDescription) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut jobs: Vec<JobDescription> = self.load_list(JOBS_KEY).await?;
        info!("Storing job {} ({} at {})", job.id, job.title, job.company);
        jobs.push(job);
        self.save_list(JOBS_KEY, &jobs).await
    }

    /// Removes a job and every match computed against it. Returns false if absent.
    pub async fn remove_job(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut jobs: Vec<JobDescription> = self.load_list(JOBS_KEY).await?;
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        if jobs.len() == before {
            return Ok(false);
        }

        let mut matches: Vec<JobMatch> = self.load_list(MATCHES_KEY).await?;
        matches.retain(|m| m.job_id != id);
        self.save_list(MATCHES_KEY, &matches).await?;
        self.save_list(JOBS_KEY, &jobs).await?;

        info!("Removed job {id}");
        Ok(true)
    }

    // ── Matches ─────────────────────────────────────────────────────────────

    /// All stored matches, optionally for one resume, best score first.
    pub async fn list_matches(
        &self,
        resume_id: Option<&str>,
    ) -> Result<Vec<JobMatch>, StorageError> {
        let mut matches: Vec<JobMatch> = self.load_list(MATCHES_KEY).await?;
        if let Some(id) = resume_id {
            matches.retain(|m| m.resume_id == id);
        }
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        Ok(matches)
    }

    /// Stores freshly computed matches; an existing record for the same
    /// (job, resume) pair is replaced in place.
    pub async fn upsert_matches(&self, fresh: &[JobMatch]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut matches: Vec<JobMatch> = self.load_list(MATCHES_KEY).await?;
        for m in fresh {
            match matches.iter_mut().find(|existing| existing.same_pair(m)) {
                Some(existing) => *existing = m.clone(),
                None => matches.push(m.clone()),
            }
        }
        self.save_list(MATCHES_KEY, &matches).await
    }

    pub async fn clear_all(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        for key in [RESUMES_KEY, JOBS_KEY, MATCHES_KEY] {
            self.store.delete(key).await?;
        }
        info!("Cleared all stored data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn repo() -> Repository {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    /// Memory store whose writes to one key start failing once armed.
    struct FlakyStore {
        inner: MemoryStore,
        failing_key: &'static str,
        armed: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn save(&self, key: &str, value: Value) -> Result<(), StorageError> {
            if key == self.failing_key && self.armed.load(Ordering::SeqCst) {
                return Err(StorageError::Object(format!("write to {key} failed")));
            }
            self.inner.save(key, value).await
        }
        async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
            self.inner.load(key).await
        }
        async fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.inner.delete(key).await
        }
        fn backend(&self) -> &'static str {
            "flaky"
        }
    }

    fn job_match(job_id: &str, resume_id: &str, score: u32) -> JobMatch {
        JobMatch {
            job_id: job_id.to_string(),
            resume_id: resume_id.to_string(),
            match_score: score,
            matched_skills: vec![],
            missing_skills: vec![],
            analysis: String::new(),
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let repo = repo();
        assert!(repo.list_resumes().await.unwrap().is_empty());
        assert!(repo.list_jobs().await.unwrap().is_empty());
        assert!(repo.list_matches(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_get_replace_remove_resume() {
        let repo = repo();
        let mut resume = Resume::new("cv.pdf", "Skills: python");
        let id = resume.id.clone();
        repo.add_resume(resume.clone()).await.unwrap();

        assert_eq!(repo.get_resume(&id).await.unwrap(), Some(resume.clone()));

        resume.text = "Skills: python, sql".to_string();
        assert!(repo.replace_resume(resume.clone()).await.unwrap());
        assert_eq!(repo.get_resume(&id).await.unwrap().unwrap().text, resume.text);

        let removed = repo.remove_resume(&id).await.unwrap();
        assert_eq!(removed.map(|r| r.id), Some(id.clone()));
        assert!(repo.get_resume(&id).await.unwrap().is_none());
        assert!(repo.remove_resume(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_unknown_resume_returns_false() {
        let repo = repo();
        let resume = Resume::new("cv.pdf", "text");
        assert!(!repo.replace_resume(resume).await.unwrap());
        assert!(repo.list_resumes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_pair() {
        let repo = repo();
        repo.upsert_matches(&[job_match("j1", "r1", 40), job_match("j2", "r1", 70)])
            .await
            .unwrap();
        repo.upsert_matches(&[job_match("j1", "r1", 90)]).await.unwrap();

        let matches = repo.list_matches(Some("r1")).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].job_id, "j1");
        assert_eq!(matches[0].match_score, 90);
    }

    #[tokio::test]
    async fn test_removing_job_drops_its_matches() {
        let repo = repo();
        let job = JobDescription::new("Dev", "Acme", "Rust", vec![]);
        let job_id = job.id.clone();
        repo.add_job(job).await.unwrap();
        assert_eq!(repo.get_job(&job_id).await.unwrap().unwrap().company, "Acme");
        repo.upsert_matches(&[job_match(&job_id, "r1", 50), job_match("other", "r1", 60)])
            .await
            .unwrap();

        assert!(repo.remove_job(&job_id).await.unwrap());
        assert!(!repo.remove_job(&job_id).await.unwrap());
        assert!(repo.get_job(&job_id).await.unwrap().is_none());
        let matches = repo.list_matches(None).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].job_id, "other");
    }

    #[tokio::test]
    async fn test_list_matches_filters_by_resume() {
        let repo = repo();
        repo.upsert_matches(&[job_match("j1", "r1", 10), job_match("j1", "r2", 20)])
            .await
            .unwrap();
        let matches = repo.list_matches(Some("r2")).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].resume_id, "r2");
    }

    #[tokio::test]
    async fn test_clear_all() {
        let repo = repo();
        repo.add_resume(Resume::new("a.pdf", "a")).await.unwrap();
        repo.add_job(JobDescription::new("t", "c", "d", vec![]))
            .await
            .unwrap();
        repo.upsert_matches(&[job_match("j", "r", 1)]).await.unwrap();

        repo.clear_all().await.unwrap();
        assert!(repo.list_resumes().await.unwrap().is_empty());
        assert!(repo.list_jobs().await.unwrap().is_empty());
        assert!(repo.list_matches(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_records_written_in_persistence_format() {
        let store = Arc::new(MemoryStore::new());
        store
            .save(
                JOBS_KEY,
                json!([{
                    "id": "job-1",
                    "title": "Engineer",
                    "company": "Acme",
                    "description": "React",
                    "requirements": ["React"]
                }]),
            )
            .await
            .unwrap();
        let repo = Repository::new(store);
        let jobs = repo.list_jobs().await.unwrap();
        assert_eq!(jobs[0].id, "job-1");
        assert_eq!(jobs[0].location, None);
    }

    #[tokio::test]
    async fn test_failed_match_prune_keeps_records_consistent() {
        let store = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            failing_key: MATCHES_KEY,
            armed: AtomicBool::new(false),
        });
        let repo = Repository::new(store.clone());

        let resume = Resume::new("cv.pdf", "Skills: python");
        let resume_id = resume.id.clone();
        repo.add_resume(resume).await.unwrap();
        let job = JobDescription::new("Dev", "Acme", "Python", vec![]);
        let job_id = job.id.clone();
        repo.add_job(job).await.unwrap();
        repo.upsert_matches(&[job_match(&job_id, &resume_id, 70)])
            .await
            .unwrap();

        store.armed.store(true, Ordering::SeqCst);
        assert!(repo.remove_resume(&resume_id).await.is_err());
        assert!(repo.remove_job(&job_id).await.is_err());

        // Every remaining match still points at a stored resume and job
        assert!(repo.get_resume(&resume_id).await.unwrap().is_some());
        assert!(repo.get_job(&job_id).await.unwrap().is_some());
        assert_eq!(repo.list_matches(None).await.unwrap().len(), 1);
    }
}
