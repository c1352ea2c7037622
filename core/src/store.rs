//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Phases call store methods — they never execute SQL directly.
//!
//! Bulk inserts run one prepared statement per table inside the calling
//! phase's transaction; distribution queries back the run summary and the
//! test suite.

use crate::{
    entity_phase::EntityRow,
    error::GenResult,
    filing_phase::FilingRow,
    invoice_phase::InvoiceRow,
    lookup_phase::{FilingTypeRow, JurisdictionRow},
    payment_phase::PaymentRow,
    types::RowId,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

pub struct LabStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl LabStore {
    pub fn open(path: &str) -> GenResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GenResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply the foundation schema. Indexes are NOT built here; call
    /// build_indexes() after data load.
    pub fn migrate(&self) -> GenResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_schema.sql"))?;
        Ok(())
    }

    /// Build secondary indexes. The pipeline calls this once, after the
    /// last phase has committed.
    pub fn build_indexes(&self) -> GenResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/002_indexes.sql"))?;
        Ok(())
    }

    /// Run `f` inside a scoped transaction. Commit on success; a failure
    /// rolls the whole scope back, so a failed phase leaves no rows.
    pub fn phase_scope<T>(&self, f: impl FnOnce(&LabStore) -> GenResult<T>) -> GenResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        let out = f(self)?;
        tx.commit()?;
        Ok(out)
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(&self, run_id: &str, seed: u64, version: &str) -> GenResult<()> {
        self.conn.execute(
            "INSERT INTO generation_run (run_id, seed, version, started_at)
             VALUES (?1, ?2, ?3, datetime('now'))",
            params![run_id, seed as i64, version],
        )?;
        Ok(())
    }

    // ── Bulk inserts ───────────────────────────────────────────

    pub fn insert_jurisdictions(&self, rows: &[JurisdictionRow]) -> GenResult<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO jurisdiction (jurisdiction_id, country_code, name)
             VALUES (?1, ?2, ?3)",
        )?;
        for r in rows {
            stmt.execute(params![r.jurisdiction_id, r.country_code, r.name])?;
        }
        Ok(rows.len())
    }

    pub fn insert_filing_types(&self, rows: &[FilingTypeRow]) -> GenResult<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO filing_type (filing_type_id, label, frequency)
             VALUES (?1, ?2, ?3)",
        )?;
        for r in rows {
            stmt.execute(params![r.filing_type_id, r.label, r.frequency])?;
        }
        Ok(rows.len())
    }

    pub fn insert_entities(&self, rows: &[EntityRow]) -> GenResult<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO entity (entity_id, client_name, name, country_code,
                                 risk_tier, created_at, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for r in rows {
            stmt.execute(params![
                r.entity_id,
                r.client_name,
                r.name,
                r.country_code,
                r.risk_tier,
                r.created_at.to_string(),
                if r.is_active { 1 } else { 0 },
            ])?;
        }
        Ok(rows.len())
    }

    pub fn insert_filings(&self, rows: &[FilingRow]) -> GenResult<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO compliance_filing (
                filing_id, entity_id, jurisdiction_id, filing_type_id,
                due_date, filed_date, status, penalty_amount, last_updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for r in rows {
            stmt.execute(params![
                r.filing_id,
                r.entity_id,
                r.jurisdiction_id,
                r.filing_type_id,
                r.due_date.to_string(),
                r.filed_date.map(|d| d.to_string()),
                r.status.as_str(),
                r.penalty_amount,
                r.last_updated_at.to_string(),
            ])?;
        }
        Ok(rows.len())
    }

    pub fn insert_invoices(&self, rows: &[InvoiceRow]) -> GenResult<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO invoice (
                invoice_id, entity_id, amount, currency, status,
                issued_date, due_date
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for r in rows {
            stmt.execute(params![
                r.invoice_id,
                r.entity_id,
                r.amount,
                r.currency,
                r.status.as_str(),
                r.issued_date.to_string(),
                r.due_date.to_string(),
            ])?;
        }
        Ok(rows.len())
    }

    pub fn insert_payments(&self, rows: &[PaymentRow]) -> GenResult<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO invoice_payment (
                payment_id, invoice_id, amount, method, status, paid_date
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for r in rows {
            stmt.execute(params![
                r.payment_id,
                r.invoice_id,
                r.amount,
                r.method,
                r.status.as_str(),
                r.paid_date.to_string(),
            ])?;
        }
        Ok(rows.len())
    }

    // ── Counts ─────────────────────────────────────────────────

    fn count(&self, sql: &str) -> GenResult<i64> {
        self.conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn entity_count(&self) -> GenResult<i64> {
        self.count("SELECT COUNT(*) FROM entity")
    }

    pub fn jurisdiction_count(&self) -> GenResult<i64> {
        self.count("SELECT COUNT(*) FROM jurisdiction")
    }

    pub fn filing_type_count(&self) -> GenResult<i64> {
        self.count("SELECT COUNT(*) FROM filing_type")
    }

    pub fn filing_count(&self) -> GenResult<i64> {
        self.count("SELECT COUNT(*) FROM compliance_filing")
    }

    pub fn invoice_count(&self) -> GenResult<i64> {
        self.count("SELECT COUNT(*) FROM invoice")
    }

    pub fn payment_count(&self) -> GenResult<i64> {
        self.count("SELECT COUNT(*) FROM invoice_payment")
    }

    pub fn drift_batch_count(&self) -> GenResult<i64> {
        self.count("SELECT COUNT(*) FROM drift_batch")
    }

    // ── Distribution queries ───────────────────────────────────

    pub fn filing_status_counts(&self) -> GenResult<Vec<(String, i64)>> {
        self.group_counts("SELECT status, COUNT(*) FROM compliance_filing GROUP BY status")
    }

    pub fn invoice_status_counts(&self) -> GenResult<Vec<(String, i64)>> {
        self.group_counts("SELECT status, COUNT(*) FROM invoice GROUP BY status")
    }

    pub fn payment_status_counts(&self) -> GenResult<Vec<(String, i64)>> {
        self.group_counts("SELECT status, COUNT(*) FROM invoice_payment GROUP BY status")
    }

    pub fn client_name_counts(&self) -> GenResult<Vec<(String, i64)>> {
        self.group_counts(
            "SELECT client_name, COUNT(*) FROM entity
             GROUP BY client_name ORDER BY COUNT(*) DESC",
        )
    }

    pub fn country_counts(&self) -> GenResult<Vec<(String, i64)>> {
        self.group_counts("SELECT country_code, COUNT(*) FROM entity GROUP BY country_code")
    }

    fn group_counts(&self, sql: &str) -> GenResult<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn entity_count_for_client(&self, client_name: &str) -> GenResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM entity WHERE client_name = ?1",
                params![client_name],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// Filings whose entity_id falls in [1, max_id] (the hot-subrange share).
    pub fn filings_for_entities_below(&self, max_id: RowId) -> GenResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM compliance_filing WHERE entity_id <= ?1",
                params![max_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    // ── Referential integrity probes ───────────────────────────

    /// Filings referencing a missing entity, jurisdiction, or filing type.
    /// Zero by construction; the test suite asserts it stays zero.
    pub fn orphan_filing_count(&self) -> GenResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM compliance_filing f
             LEFT JOIN entity e ON f.entity_id = e.entity_id
             LEFT JOIN jurisdiction j ON f.jurisdiction_id = j.jurisdiction_id
             LEFT JOIN filing_type t ON f.filing_type_id = t.filing_type_id
             WHERE e.entity_id IS NULL
                OR j.jurisdiction_id IS NULL
                OR t.filing_type_id IS NULL",
        )
    }

    pub fn orphan_invoice_count(&self) -> GenResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM invoice i
             LEFT JOIN entity e ON i.entity_id = e.entity_id
             WHERE e.entity_id IS NULL",
        )
    }

    pub fn orphan_payment_count(&self) -> GenResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM invoice_payment p
             LEFT JOIN invoice i ON p.invoice_id = i.invoice_id
             WHERE i.invoice_id IS NULL",
        )
    }

    // ── Drift support ──────────────────────────────────────────

    pub fn max_filing_id(&self) -> GenResult<RowId> {
        self.count("SELECT COALESCE(MAX(filing_id), 0) FROM compliance_filing")
    }

    /// Set-oriented status aging: every `modulus`-th Pending filing becomes
    /// Overdue, stamped with a note and a fresh last_updated_at. Returns the
    /// number of rows changed.
    pub fn age_pending_filings(
        &self,
        modulus: i64,
        note: &str,
        stamp: NaiveDate,
    ) -> GenResult<usize> {
        let changed = self.conn.execute(
            "UPDATE compliance_filing
             SET status = 'Overdue', notes = ?1, last_updated_at = ?2
             WHERE status = 'Pending' AND filing_id % ?3 = 0",
            params![note, stamp.to_string(), modulus],
        )?;
        Ok(changed)
    }

    pub fn insert_drift_batch(
        &self,
        batch_id: &str,
        kind: &str,
        rows_affected: i64,
        applied_at: NaiveDate,
    ) -> GenResult<()> {
        self.conn.execute(
            "INSERT INTO drift_batch (batch_id, kind, rows_affected, applied_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![batch_id, kind, rows_affected, applied_at.to_string()],
        )?;
        Ok(())
    }

    // ── Test helpers ───────────────────────────────────────────

    /// Entity names in id order, for determinism comparisons.
    pub fn entity_names(&self, limit: i64) -> GenResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM entity ORDER BY entity_id ASC LIMIT ?1",
        )?;
        let names = stmt
            .query_map(params![limit], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// (filing_id, entity_id, status, due_date) in id order, for
    /// determinism comparisons.
    pub fn filing_digest(&self, limit: i64) -> GenResult<Vec<(RowId, RowId, String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT filing_id, entity_id, status, due_date
             FROM compliance_filing ORDER BY filing_id ASC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn due_date_bounds(&self) -> GenResult<Option<(String, String)>> {
        let result = self
            .conn
            .query_row(
                "SELECT MIN(due_date), MAX(due_date) FROM compliance_filing",
                [],
                |row| {
                    let min: Option<String> = row.get(0)?;
                    let max: Option<String> = row.get(1)?;
                    Ok(min.zip(max))
                },
            )?;
        Ok(result)
    }
}
