use crate::domain::{BirthdayWindow, ContactId};
use crate::error::{StoreError, StoreResult};
use crate::metrics::{Metrics, StoreTimer};
use crate::models::{Contact, ContactFields};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, InterruptHandle, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    birthday TEXT NOT NULL,
    details TEXT NOT NULL DEFAULT ''
);";

const COLUMNS: &str = "id, first_name, last_name, email, phone, birthday, details";

const RUNNING: u8 = 0;
const COMMITTING: u8 = 1;
const ABANDONED: u8 = 2;

/// Who owns the outcome of a store call: the blocking task or the timeout.
///
/// Exactly one of `begin_commit` and `abandon` wins. Once the caller has
/// abandoned a call its transaction can no longer commit, and once a commit
/// has started the caller waits for it instead of reporting a timeout.
#[derive(Debug, Default)]
struct CallState(AtomicU8);

impl CallState {
    fn begin_commit(&self) -> bool {
        self.0
            .compare_exchange(RUNNING, COMMITTING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn abandon(&self) -> bool {
        self.0
            .compare_exchange(RUNNING, ABANDONED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn is_abandoned(&self) -> bool {
        self.0.load(Ordering::Acquire) == ABANDONED
    }
}

/// A connection scoped to a single store call.
///
/// Opened inside the blocking task and released when it goes out of scope,
/// on success and on every error path.
struct Session {
    conn: Connection,
    op: &'static str,
    timeout: Duration,
    state: Arc<CallState>,
}

impl Session {
    fn open(
        path: &Path,
        timeout: Duration,
        op: &'static str,
        state: Arc<CallState>,
    ) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(timeout)?;
        tracing::trace!(op, "session opened");
        Ok(Self {
            conn,
            op,
            timeout,
            state,
        })
    }

    fn interrupt_handle(&self) -> InterruptHandle {
        self.conn.get_interrupt_handle()
    }

    /// Fail with `Timeout` if the caller has already given up on this call.
    fn ensure_live(&self) -> StoreResult<()> {
        if self.state.is_abandoned() {
            return Err(StoreError::Timeout(self.timeout));
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::trace!(op = self.op, "session released");
    }
}

/// Contact repository backed by a SQLite file.
///
/// Each call opens its own connection on tokio's blocking pool and runs under
/// a timeout. Writes run in an immediate transaction that is committed
/// explicitly; any error drops the transaction, which rolls it back.
#[derive(Clone)]
pub struct SqliteContactRepository {
    path: Arc<PathBuf>,
    timeout: Duration,
    metrics: Metrics,
}

impl SqliteContactRepository {
    /// Open (creating if needed) the database at `path` and ensure the
    /// `contacts` table exists.
    pub async fn open(path: impl Into<PathBuf>, timeout: Duration) -> StoreResult<Self> {
        let repo = Self {
            path: Arc::new(path.into()),
            timeout,
            metrics: Metrics::new(),
        };

        repo.with_session("init_schema", |session| {
            let mode: String =
                session
                    .conn
                    .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
            session.conn.execute_batch(SCHEMA)?;
            tracing::debug!(journal_mode = %mode, "contacts schema ready");
            Ok(())
        })
        .await?;

        tracing::info!(path = %repo.path.display(), "Contact store opened");
        Ok(repo)
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run `f` against a fresh session on the blocking pool, bounded by the
    /// configured timeout.
    async fn with_session<T, F>(&self, op: &'static str, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Session) -> StoreResult<T> + Send + 'static,
    {
        let path = Arc::clone(&self.path);
        let timeout = self.timeout;
        let state = Arc::new(CallState::default());
        let task_state = Arc::clone(&state);
        let (handle_tx, mut handle_rx) = oneshot::channel();
        let timer = StoreTimer::new(self.metrics.clone());

        let mut task = tokio::task::spawn_blocking(move || {
            if task_state.is_abandoned() {
                return Err(StoreError::Timeout(timeout));
            }
            let mut session = Session::open(&path, timeout, op, task_state)?;
            let _ = handle_tx.send(session.interrupt_handle());
            // The caller may have given up before the handle was sent.
            session.ensure_live()?;
            f(&mut session)
        });

        let result = match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(joined) => Self::joined(joined),
            Err(_) if state.abandon() => {
                // Abort the running statement so the open transaction rolls back.
                if let Ok(handle) = handle_rx.try_recv() {
                    handle.interrupt();
                }
                self.metrics.record_store_timeout();
                Err(StoreError::Timeout(self.timeout))
            }
            Err(_) => {
                tracing::debug!(op, "Timeout reached during commit, waiting for it");
                Self::joined(task.await)
            }
        };

        match &result {
            Err(e) if e.is_persistence() => {
                timer.complete_with_error();
                tracing::error!(op, error = %e, "Store call failed");
            }
            _ => timer.complete(),
        }

        result
    }

    fn joined<T>(
        joined: Result<StoreResult<T>, tokio::task::JoinError>,
    ) -> StoreResult<T> {
        joined
            .map_err(|e| StoreError::Task(format!("Task join error: {}", e)))
            .and_then(|r| r)
    }

    /// Like `with_session`, but inside an immediate transaction that commits
    /// only when `f` succeeds.
    async fn with_transaction<T, F>(&self, op: &'static str, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> StoreResult<T> + Send + 'static,
    {
        self.with_session(op, move |session| {
            let state = Arc::clone(&session.state);
            let timeout = session.timeout;
            let tx = session
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            // An abandoned call never commits; dropping `tx` rolls it back.
            let outcome = match f(&tx) {
                Ok(value) if state.begin_commit() => {
                    tx.commit().map(|_| value).map_err(StoreError::from)
                }
                Ok(_) => Err(StoreError::Timeout(timeout)),
                Err(e) => Err(e),
            };
            if let Err(e) = &outcome {
                if e.is_persistence() {
                    tracing::warn!(op, error = %e, "Rolling back write");
                }
            }
            outcome
        })
        .await
    }

    fn returned(&self, contacts: Vec<Contact>) -> Vec<Contact> {
        self.metrics.record_contacts_returned(contacts.len());
        contacts
    }
}

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        birthday: row.get(5)?,
        details: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
    })
}

fn select_by_id(conn: &Connection, id: i64) -> StoreResult<Contact> {
    conn.query_row(
        &format!("SELECT {} FROM contacts WHERE id = ?1", COLUMNS),
        [id],
        row_to_contact,
    )
    .optional()?
    .ok_or(StoreError::NotFound(id))
}

fn to_sql_count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn create(&self, fields: &ContactFields) -> StoreResult<Contact> {
        let fields = fields.clone();
        self.with_transaction("create", move |tx| {
            tx.execute(
                "INSERT INTO contacts (first_name, last_name, email, phone, birthday, details)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    fields.first_name,
                    fields.last_name,
                    fields.email.as_str(),
                    fields.phone.as_str(),
                    fields.birthday,
                    fields.details,
                ],
            )?;
            let id = tx.last_insert_rowid();
            tracing::debug!(id, "Contact inserted");
            Ok(Contact::from_fields(id, fields))
        })
        .await
    }

    async fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.with_session("get", move |session| select_by_id(&session.conn, id.get()))
            .await
    }

    async fn list(&self, skip: usize, limit: usize) -> StoreResult<Vec<Contact>> {
        let contacts = self
            .with_session("list", move |session| {
                let mut stmt = session.conn.prepare(&format!(
                    "SELECT {} FROM contacts ORDER BY id LIMIT ?1 OFFSET ?2",
                    COLUMNS
                ))?;
                let rows = stmt
                    .query_map([to_sql_count(limit), to_sql_count(skip)], row_to_contact)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await?;
        Ok(self.returned(contacts))
    }

    async fn update(&self, id: ContactId, fields: &ContactFields) -> StoreResult<Contact> {
        let fields = fields.clone();
        let id = id.get();
        self.with_transaction("update", move |tx| {
            let changed = tx.execute(
                "UPDATE contacts
                 SET first_name = ?1, last_name = ?2, email = ?3, phone = ?4, birthday = ?5, details = ?6
                 WHERE id = ?7",
                params![
                    fields.first_name,
                    fields.last_name,
                    fields.email.as_str(),
                    fields.phone.as_str(),
                    fields.birthday,
                    fields.details,
                    id,
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }
            select_by_id(tx, id)
        })
        .await
    }

    async fn delete(&self, id: ContactId) -> StoreResult<Contact> {
        let id = id.get();
        self.with_transaction("delete", move |tx| {
            let snapshot = select_by_id(tx, id)?;
            tx.execute("DELETE FROM contacts WHERE id = ?1", [id])?;
            Ok(snapshot)
        })
        .await
    }

    async fn find_by_text(&self, text: &str) -> StoreResult<Vec<Contact>> {
        let needle = text.to_lowercase();
        let contacts = self
            .with_session("find_by_text", move |session| {
                // SQLite's lower() only folds ASCII.
                session.conn.create_scalar_function(
                    "casefold",
                    1,
                    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
                    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
                )?;
                let mut stmt = session.conn.prepare(&format!(
                    "SELECT {} FROM contacts
                     WHERE instr(casefold(first_name), ?1) > 0
                        OR instr(casefold(last_name), ?1) > 0
                        OR instr(casefold(email), ?1) > 0
                        OR instr(casefold(phone), ?1) > 0
                        OR instr(casefold(details), ?1) > 0
                     ORDER BY id",
                    COLUMNS
                ))?;
                let rows = stmt
                    .query_map([needle], row_to_contact)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await?;
        Ok(self.returned(contacts))
    }

    async fn upcoming_birthdays(
        &self,
        reference: NaiveDate,
        window_days: u32,
    ) -> StoreResult<Vec<Contact>> {
        let window = BirthdayWindow::new(reference, window_days);
        let months = window
            .months()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let contacts = self
            .with_session("upcoming_birthdays", move |session| {
                // Coarse month prefilter in SQL, exact month/day match below.
                let mut stmt = session.conn.prepare(&format!(
                    "SELECT {} FROM contacts
                     WHERE CAST(strftime('%m', birthday) AS INTEGER) IN ({})
                     ORDER BY CAST(strftime('%m', birthday) AS INTEGER),
                              CAST(strftime('%d', birthday) AS INTEGER),
                              id",
                    COLUMNS, months
                ))?;
                let rows = stmt
                    .query_map([], row_to_contact)?
                    .filter(|row| match row {
                        Ok(contact) => window.contains(contact.birthday),
                        Err(_) => true,
                    })
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await?;

        tracing::debug!(
            reference = %reference,
            window_days,
            matches = contacts.len(),
            "Upcoming birthdays scanned"
        );
        Ok(self.returned(contacts))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.with_session("ping", |session| {
            let one: i64 = session.conn.query_row("SELECT 1", [], |row| row.get(0))?;
            if one != 1 {
                return Err(StoreError::Task(format!("SELECT 1 returned {}", one)));
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, PhoneNumber};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fields(first: &str, last: &str, birthday: NaiveDate) -> ContactFields {
        let mut local: String = first
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();
        if local.is_empty() {
            local.push_str("someone");
        }
        ContactFields {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: EmailAddress::new(format!("{}@example.com", local)).unwrap(),
            phone: PhoneNumber::new("+1 555 0100").unwrap(),
            birthday,
            details: String::new(),
        }
    }

    async fn open_repo() -> (TempDir, SqliteContactRepository) {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = SqliteContactRepository::open(dir.path().join("contacts.db"), Duration::from_secs(5))
            .await
            .expect("open store");
        (dir, repo)
    }

    fn id(raw: i64) -> ContactId {
        ContactId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let (_dir, repo) = open_repo().await;
        let mut input = fields("Ada", "Lovelace", date(1815, 12, 10));
        input.details = "Analyst".to_string();

        let created = repo.create(&input).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get(id(created.id)).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.details, "Analyst");
        assert_eq!(fetched.birthday, date(1815, 12, 10));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_dir, repo) = open_repo().await;
        let err = repo.get(id(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_list_pages_in_insertion_order() {
        let (_dir, repo) = open_repo().await;
        assert!(repo.list(0, 10).await.unwrap().is_empty());

        for name in ["Alice", "Bob", "Carol"] {
            repo.create(&fields(name, "Test", date(1990, 1, 1))).await.unwrap();
        }

        let page = repo.list(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].first_name, "Bob");

        let all = repo.list(0, 10).await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert!(repo.list(5, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let (_dir, repo) = open_repo().await;
        let mut original = fields("Grace", "Hopper", date(1906, 12, 9));
        original.details = "Admiral".to_string();
        let created = repo.create(&original).await.unwrap();

        let replacement = fields("Gracie", "Hopper", date(1906, 12, 10));
        let updated = repo.update(id(created.id), &replacement).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "Gracie");
        assert_eq!(updated.details, "");

        let fetched = repo.get(id(created.id)).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_dir, repo) = open_repo().await;
        let err = repo
            .update(id(5), &fields("No", "One", date(2000, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_returns_snapshot() {
        let (_dir, repo) = open_repo().await;
        let created = repo
            .create(&fields("Alan", "Turing", date(1912, 6, 23)))
            .await
            .unwrap();

        let removed = repo.delete(id(created.id)).await.unwrap();
        assert_eq!(removed, created);
        assert!(matches!(
            repo.get(id(created.id)).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(id(created.id)).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_text_is_case_insensitive() {
        let (_dir, repo) = open_repo().await;
        repo.create(&fields("Jane", "Smith-Jones", date(1980, 5, 5)))
            .await
            .unwrap();
        repo.create(&fields("John", "Doe", date(1980, 5, 6)))
            .await
            .unwrap();
        repo.create(&fields("Тарас", "Шевченко", date(1814, 3, 9)))
            .await
            .unwrap();

        let found = repo.find_by_text("smith").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].last_name, "Smith-Jones");

        let found = repo.find_by_text("ШЕВЧ").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Тарас");

        assert!(repo.find_by_text("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_text_matches_wildcards_literally() {
        let (_dir, repo) = open_repo().await;
        let mut with_percent = fields("Percy", "Cent", date(1980, 1, 1));
        with_percent.details = "owes 100% of rent".to_string();
        repo.create(&with_percent).await.unwrap();
        repo.create(&fields("Other", "Person", date(1980, 1, 1)))
            .await
            .unwrap();

        let found = repo.find_by_text("0%").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(repo.find_by_text("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_text_searches_details_and_phone() {
        let (_dir, repo) = open_repo().await;
        let mut contact = fields("Kim", "Lee", date(1990, 2, 2));
        contact.details = "Met at RustConf".to_string();
        repo.create(&contact).await.unwrap();

        assert_eq!(repo.find_by_text("rustconf").await.unwrap().len(), 1);
        assert_eq!(repo.find_by_text("555 0100").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_within_month() {
        let (_dir, repo) = open_repo().await;
        repo.create(&fields("Inside", "A", date(1990, 3, 28))).await.unwrap();
        repo.create(&fields("Before", "B", date(1990, 3, 20))).await.unwrap();
        repo.create(&fields("After", "C", date(1990, 4, 2))).await.unwrap();
        repo.create(&fields("Edge", "D", date(2001, 3, 25))).await.unwrap();

        let found = repo.upcoming_birthdays(date(2024, 3, 25), 7).await.unwrap();
        let names: Vec<_> = found.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(names, vec!["Edge", "Inside"]);
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_across_year_end() {
        let (_dir, repo) = open_repo().await;
        repo.create(&fields("Jan", "A", date(1985, 1, 2))).await.unwrap();
        repo.create(&fields("Dec", "B", date(1970, 12, 30))).await.unwrap();
        repo.create(&fields("Early", "C", date(1970, 12, 20))).await.unwrap();
        repo.create(&fields("Late", "D", date(1985, 1, 10))).await.unwrap();

        let found = repo.upcoming_birthdays(date(2024, 12, 28), 7).await.unwrap();
        let names: Vec<_> = found.iter().map(|c| c.first_name.as_str()).collect();
        // Ordered by month then day, so January sorts first.
        assert_eq!(names, vec!["Jan", "Dec"]);
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_empty_table() {
        let (_dir, repo) = open_repo().await;
        let found = repo.upcoming_birthdays(date(2024, 6, 1), 7).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_ping_and_metrics() {
        let (_dir, repo) = open_repo().await;
        repo.ping().await.unwrap();
        let _ = repo.get(id(1)).await;

        let summary = repo.metrics().summary();
        // init_schema + ping + get
        assert_eq!(summary.store_calls_total, 3);
        assert_eq!(summary.store_errors_total, 0);
    }

    #[tokio::test]
    async fn test_locked_database_fails_without_partial_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.db");
        let repo = SqliteContactRepository::open(&path, Duration::from_millis(200))
            .await
            .unwrap();

        let blocker = Connection::open(&path).unwrap();
        blocker.execute_batch("BEGIN EXCLUSIVE").unwrap();

        let err = repo
            .create(&fields("Blocked", "Writer", date(1990, 1, 1)))
            .await
            .unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(repo.metrics().store_errors_total(), 1);

        blocker.execute_batch("ROLLBACK").unwrap();
        assert!(repo.list(0, 10).await.unwrap().is_empty());
    }

    fn with_timeout(repo: &SqliteContactRepository, timeout: Duration) -> SqliteContactRepository {
        SqliteContactRepository {
            path: Arc::clone(&repo.path),
            timeout,
            metrics: Metrics::new(),
        }
    }

    #[tokio::test]
    async fn test_timed_out_write_is_rolled_back() {
        let (_dir, repo) = open_repo().await;
        let slow = with_timeout(&repo, Duration::from_millis(50));

        let err = slow
            .with_transaction("slow_insert", |tx| {
                tx.execute(
                    "INSERT INTO contacts (first_name, last_name, email, phone, birthday, details)
                     VALUES ('Slow', 'Writer', 'slow@example.com', '1', '1990-01-01', '')",
                    [],
                )?;
                std::thread::sleep(Duration::from_millis(300));
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)));
        assert_eq!(slow.metrics().store_timeouts_total(), 1);

        // Let the abandoned task finish and release its connection.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(repo.list(0, 10).await.unwrap().is_empty());
        repo.create(&fields("After", "Timeout", date(1990, 1, 1)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_only_reported_creates_are_committed() {
        let (_dir, repo) = open_repo().await;
        let hasty = with_timeout(&repo, Duration::from_millis(1));

        let mut ok = 0;
        for n in 0..50 {
            match hasty
                .create(&fields(&format!("P{}", n), "Hasty", date(1990, 1, 1)))
                .await
            {
                Ok(_) => ok += 1,
                // Timeouts, or busy errors while an abandoned call still holds the lock.
                Err(e) => assert!(e.is_persistence(), "unexpected: {}", e),
            }
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        let rows = repo.list(0, 100).await.unwrap();
        assert_eq!(rows.len(), ok);
    }
}
