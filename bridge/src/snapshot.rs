//! Snapshot codec: format detection for configuration export and import.
//!
//! A snapshot travels either as CC Switch snapshot JSON or as a raw SQL
//! dump. The filename extension is a weak signal (users rename files), so
//! import checks content shape first; a `.sql`-named file is trusted as raw
//! SQL without attempting a JSON parse. The two interpretations are never
//! merged: exactly one is selected, or the import is rejected.

use cc_switch_protocol::Snapshot;
use serde_json::Value;
use thiserror::Error;

/// The codec's export decision: what to download, and under which name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub filename: String,
    pub content: String,
}

/// The single interpretation selected for an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportPayload {
    /// Snapshot JSON carrying an embedded SQL dump.
    SnapshotJson { sql: String },
    /// The file text itself is the SQL dump.
    RawSql { sql: String },
}

impl ImportPayload {
    pub fn sql(&self) -> &str {
        match self {
            ImportPayload::SnapshotJson { sql } | ImportPayload::RawSql { sql } => sql,
        }
    }
}

/// The file matched neither recognized backup shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized backup: expected CC Switch snapshot JSON or a .sql backup")]
pub struct ImportRejected;

/// Decides filename and content for exporting `snapshot` as `filename`.
///
/// A `.sql` filename or a `format: "sql"` snapshot selects SQL output; the
/// SQL payload is preferred, but a snapshot that failed to produce one is
/// still exported as JSON rather than failing the export outright.
pub fn plan_export(snapshot: &Snapshot, filename: &str) -> Result<ExportPlan, serde_json::Error> {
    let wants_sql = has_sql_extension(filename) || snapshot.declares_sql();

    if wants_sql {
        let filename = if has_sql_extension(filename) {
            filename.to_string()
        } else {
            format!("{filename}.sql")
        };
        let content = match &snapshot.sql {
            Some(sql) => sql.clone(),
            None => serde_json::to_string_pretty(snapshot)?,
        };
        return Ok(ExportPlan { filename, content });
    }

    Ok(ExportPlan {
        filename: filename.to_string(),
        content: serde_json::to_string_pretty(snapshot)?,
    })
}

/// Resolves the effective SQL payload of an imported file.
pub fn detect_import(name: &str, text: &str) -> Result<ImportPayload, ImportRejected> {
    let is_sql_name = has_sql_extension(name);

    // A literal JSON `null` is treated like unparseable text.
    let parsed: Option<Value> = if is_sql_name {
        None
    } else {
        serde_json::from_str(text).ok().filter(|v: &Value| !v.is_null())
    };

    let payload = match parsed {
        Some(value) => match value.get("sql").and_then(Value::as_str) {
            Some(sql) => ImportPayload::SnapshotJson {
                sql: sql.to_string(),
            },
            // JSON-shaped but with no usable sql field: not a backup.
            None => return Err(ImportRejected),
        },
        None => ImportPayload::RawSql {
            sql: text.to_string(),
        },
    };

    if payload.sql().trim().is_empty() {
        return Err(ImportRejected);
    }
    Ok(payload)
}

fn has_sql_extension(name: &str) -> bool {
    // Byte-wise so a multibyte filename can never split a char boundary.
    let bytes = name.as_bytes();
    bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".sql")
}
