//! Message repository. Messages are append-only: there is no update or delete.

use anyhow::Result;
use bazaar_types::api::NewMessage;
use rusqlite::{Connection, OptionalExtension};

use crate::Database;
use crate::models::MessageRow;

const SELECT_MESSAGE: &str =
    "SELECT id, conversation_id, user_id, content, created_at FROM messages";

impl Database {
    pub fn create_message(&self, id: &str, message: &NewMessage) -> Result<MessageRow> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO messages (id, conversation_id, user_id, content) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    id,
                    message.conversation_id.to_string(),
                    message.user_id.to_string(),
                    message.content
                ],
            )?;
            query_message_by_id(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("Message vanished after insert: {}", id))
        })
    }

    pub fn get_message_by_id(&self, id: &str) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| query_message_by_id(conn, id))
    }

    /// Messages of a conversation in the order they were posted.
    pub fn get_messages_by_conversation_id(&self, conversation_id: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_MESSAGE} WHERE conversation_id = ?1 ORDER BY created_at ASC, rowid ASC"
            ))?;

            let rows = stmt
                .query_map([conversation_id], map_message)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_message_by_id(conn: &Connection, id: &str) -> Result<Option<MessageRow>> {
    let row = conn
        .query_row(&format!("{SELECT_MESSAGE} WHERE id = ?1"), [id], map_message)
        .optional()?;
    Ok(row)
}

fn map_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use bazaar_types::api::NewMessage;
    use uuid::Uuid;

    use crate::test_support::db_with_user;

    fn new_message(conversation_id: Uuid, user_id: Uuid, content: &str) -> NewMessage {
        NewMessage {
            conversation_id,
            user_id,
            content: content.to_string(),
        }
    }

    #[test]
    fn messages_come_back_in_posting_order() {
        let (db, user) = db_with_user("alice");
        let conversation = Uuid::new_v4();
        db.create_conversation(&conversation.to_string(), &user, None, "thread").unwrap();
        let user: Uuid = user.parse().unwrap();

        for content in ["one", "two", "three"] {
            let id = Uuid::new_v4().to_string();
            let row = db.create_message(&id, &new_message(conversation, user, content)).unwrap();
            assert_eq!(row.id, id);
            assert_eq!(row.content, content);
        }

        let contents: Vec<String> = db
            .get_messages_by_conversation_id(&conversation.to_string())
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[test]
    fn fetch_single_message() {
        let (db, user) = db_with_user("alice");
        let conversation = Uuid::new_v4();
        db.create_conversation(&conversation.to_string(), &user, None, "thread").unwrap();

        db.create_message("m-1", &new_message(conversation, user.parse().unwrap(), "hello"))
            .unwrap();

        let row = db.get_message_by_id("m-1").unwrap().unwrap();
        assert_eq!(row.conversation_id, conversation.to_string());
        assert_eq!(row.user_id, user);
        assert!(db.get_message_by_id("m-2").unwrap().is_none());
    }

    #[test]
    fn message_needs_existing_conversation() {
        let (db, user) = db_with_user("alice");
        let result = db.create_message("m-1", &new_message(Uuid::new_v4(), user.parse().unwrap(), "hi"));
        assert!(result.is_err());
    }
}
