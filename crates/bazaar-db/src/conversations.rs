//! Conversation repository: insert-and-return, fetch by id, fetch by owner.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use crate::Database;
use crate::models::ConversationRow;

const SELECT_CONVERSATION: &str =
    "SELECT id, user_id, listing_id, title, created_at FROM conversations";

impl Database {
    pub fn create_conversation(
        &self,
        id: &str,
        user_id: &str,
        listing_id: Option<&str>,
        title: &str,
    ) -> Result<ConversationRow> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO conversations (id, user_id, listing_id, title) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, user_id, listing_id, title],
            )?;
            query_conversation_by_id(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("Conversation vanished after insert: {}", id))
        })
    }

    pub fn get_conversation_by_id(&self, id: &str) -> Result<Option<ConversationRow>> {
        self.with_conn(|conn| query_conversation_by_id(conn, id))
    }

    /// All conversations opened by `user_id`, oldest first.
    pub fn get_conversations_by_user_id(&self, user_id: &str) -> Result<Vec<ConversationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_CONVERSATION} WHERE user_id = ?1 ORDER BY created_at ASC, rowid ASC"
            ))?;

            let rows = stmt
                .query_map([user_id], map_conversation)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_conversation_by_id(conn: &Connection, id: &str) -> Result<Option<ConversationRow>> {
    let row = conn
        .query_row(
            &format!("{SELECT_CONVERSATION} WHERE id = ?1"),
            [id],
            map_conversation,
        )
        .optional()?;
    Ok(row)
}

fn map_conversation(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConversationRow> {
    Ok(ConversationRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        listing_id: row.get(2)?,
        title: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::db_with_user;

    #[test]
    fn create_returns_stored_row() {
        let (db, user) = db_with_user("alice");
        let row = db.create_conversation("c-1", &user, None, "About the bike").unwrap();

        assert_eq!(row.id, "c-1");
        assert_eq!(row.user_id, user);
        assert_eq!(row.listing_id, None);
        assert_eq!(row.title, "About the bike");
        assert!(!row.created_at.is_empty());
    }

    #[test]
    fn fetch_by_id_and_owner() {
        let (db, user) = db_with_user("alice");
        db.create_conversation("c-1", &user, None, "first").unwrap();
        db.create_conversation("c-2", &user, None, "second").unwrap();

        assert_eq!(db.get_conversation_by_id("c-2").unwrap().unwrap().title, "second");
        assert!(db.get_conversation_by_id("nope").unwrap().is_none());

        let titles: Vec<String> = db
            .get_conversations_by_user_id(&user)
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert!(db.get_conversations_by_user_id("someone-else").unwrap().is_empty());
    }

    #[test]
    fn unknown_owner_violates_foreign_key() {
        let (db, _user) = db_with_user("alice");
        assert!(db.create_conversation("c-1", "ghost", None, "hi").is_err());
    }
}
