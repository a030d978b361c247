use chrono::{DateTime, SecondsFormat, Utc};

/// A single row in the `messages` table.
///
/// Messages are immutable once written; the rows for a `chat_id` form an
/// append-only log sorted by `ts`.
#[derive(Debug, Clone)]
pub struct MessageRecord {
    /// Chat the message belongs to; caller-assigned grouping key.
    pub chat_id: String,
    /// Write-time timestamp; doubles as the sort key within a chat.
    pub ts: DateTime<Utc>,
    /// Author identifier, opaque to the server.
    pub user_id: String,
    /// Message content, opaque to the server.
    pub text: String,
}

impl MessageRecord {
    /// `ts` as stored and served: ISO-8601 with microseconds and an explicit
    /// `+00:00` offset, e.g. `2024-01-01T12:00:00.000000+00:00`.  The fixed
    /// fraction width keeps lexicographic order equal to chronological order.
    pub fn ts_rfc3339(&self) -> String {
        self.ts.to_rfc3339_opts(SecondsFormat::Micros, false)
    }
}
