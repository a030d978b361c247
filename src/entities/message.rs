use std::future::Future;

use chrono::Utc;

use crate::entities::{MessageRecord, SqliteStore};

/// Persistence interface for the chat-message log.
///
/// Two operations only: append one record, list every record for a chat.
/// There is no update or delete, no pagination, and no transaction spanning
/// multiple calls.
pub trait MessageStore: Send + Sync + 'static {
    /// Append one message record unconditionally.  No existence check, no
    /// deduplication; concurrent appends with colliding timestamps are all
    /// retained as distinct rows.
    fn append_message(
        &self,
        record: MessageRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Every message for `chat_id`, sorted by `ts` ascending.  The id is
    /// opaque and unvalidated; an unknown value matches no rows.
    fn list_messages(
        &self,
        chat_id: &str,
    ) -> impl Future<Output = Result<Vec<MessageRecord>, sqlx::Error>> + Send;
}

impl MessageStore for SqliteStore {
    async fn append_message(&self, record: MessageRecord) -> Result<(), sqlx::Error> {
        let ts = record.ts_rfc3339();
        sqlx::query(
            "INSERT INTO messages (chat_id, ts, user_id, text) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&record.chat_id)
        .bind(&ts)
        .bind(&record.user_id)
        .bind(&record.text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_messages(&self, chat_id: &str) -> Result<Vec<MessageRecord>, sqlx::Error> {
        // rowid breaks ties between equal timestamps so repeated reads stay
        // order-stable.
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            "SELECT chat_id, ts, user_id, text \
             FROM messages WHERE chat_id = ?1 ORDER BY ts ASC, rowid ASC",
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(chat_id, ts, user_id, text)| MessageRecord {
                chat_id,
                user_id,
                text,
                ts: ts.parse().unwrap_or_else(|e: chrono::ParseError| {
                    tracing::warn!(raw = %ts, error = %e, "failed to parse message ts; using now");
                    Utc::now()
                }),
            })
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{DateTime, TimeZone};

    async fn memory_store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:")
            .await
            .expect("in-memory store")
    }

    fn record(chat_id: &str, ts: DateTime<Utc>, user_id: &str, text: &str) -> MessageRecord {
        MessageRecord {
            chat_id: chat_id.into(),
            ts,
            user_id: user_id.into(),
            text: text.into(),
        }
    }

    #[tokio::test]
    async fn append_then_list_returns_the_record() {
        let store = memory_store().await;
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        store
            .append_message(record("room1", ts, "alice", "hi"))
            .await
            .unwrap();

        let messages = store.list_messages("room1").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].chat_id, "room1");
        assert_eq!(messages[0].user_id, "alice");
        assert_eq!(messages[0].text, "hi");
        assert_eq!(messages[0].ts, ts);
    }

    #[tokio::test]
    async fn list_unknown_chat_is_empty() {
        let store = memory_store().await;
        assert!(store.list_messages("nonexistent").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn messages_do_not_leak_across_chats() {
        let store = memory_store().await;
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        store
            .append_message(record("room_a", ts, "alice", "for a"))
            .await
            .unwrap();

        assert!(store.list_messages("room_b").await.unwrap().is_empty());
        assert_eq!(store.list_messages("room_a").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_sorts_by_timestamp_ascending() {
        let store = memory_store().await;
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let late = early + chrono::Duration::seconds(5);
        // Insert out of chronological order.
        store
            .append_message(record("room1", late, "bob", "second"))
            .await
            .unwrap();
        store
            .append_message(record("room1", early, "alice", "first"))
            .await
            .unwrap();

        let messages = store.list_messages("room1").await.unwrap();
        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[1].text, "second");
    }

    #[tokio::test]
    async fn colliding_timestamps_keep_every_row_in_insertion_order() {
        let store = memory_store().await;
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        store
            .append_message(record("room1", ts, "alice", "one"))
            .await
            .unwrap();
        store
            .append_message(record("room1", ts, "bob", "two"))
            .await
            .unwrap();

        let first = store.list_messages("room1").await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].text, "one");
        assert_eq!(first[1].text, "two");

        // Repeated reads return the same order.
        let second = store.list_messages("room1").await.unwrap();
        let texts: Vec<_> = second.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
    }
}
