/**
 * PostgreSQL Note Store
 *
 * sqlx-backed implementation of `NoteStore`. The conditional update is a
 * single statement whose filter includes both the id and the expected
 * version; an empty `RETURNING` set means the compare-and-swap missed.
 *
 * # Schema
 *
 * See the `create_notes` migration. `content` is a `JSON` column (not
 * `JSONB`) written and read as text, so the document comes back byte for
 * byte. Collaborators live in a `UUID[]` column with a GIN index so the
 * "owner or collaborator" listing stays an index lookup.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::notes::store::{NewNote, NoteStore, NoteUpdate, StoreError};
use crate::shared::{Note, NoteContent, NoteId, UserId};

/// Row shape shared by every query below
#[derive(Debug, sqlx::FromRow)]
struct NoteRow {
    id: Uuid,
    title: String,
    content: String,
    rendered_snapshot: String,
    version: i64,
    owner_id: Uuid,
    collaborators: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = StoreError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let content = NoteContent::parse(row.content)
            .map_err(|e| StoreError::Database(sqlx::Error::Decode(Box::new(e))))?;

        Ok(Note {
            id: NoteId(row.id),
            title: row.title,
            content,
            rendered_snapshot: row.rendered_snapshot,
            version: row.version,
            owner_id: UserId(row.owner_id),
            collaborators: row.collaborators.into_iter().map(UserId).collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn collaborator_ids(note_collaborators: &std::collections::BTreeSet<UserId>) -> Vec<Uuid> {
    note_collaborators.iter().map(|user| user.into_inner()).collect()
}

/// Note store over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn create(&self, note: NewNote) -> Result<Note, StoreError> {
        let id = Uuid::new_v4();

        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            INSERT INTO notes (id, title, content, rendered_snapshot, version, owner_id, collaborators, created_at, updated_at)
            VALUES ($1, $2, $3::json, $4, 1, $5, $6, NOW(), NOW())
            RETURNING id, title, content::text AS content, rendered_snapshot, version, owner_id, collaborators, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(&note.title)
        .bind(note.content.as_str())
        .bind(&note.rendered_snapshot)
        .bind(note.owner_id.into_inner())
        .bind(collaborator_ids(&note.collaborators))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(note_id = %id, "Inserted note");
        row.try_into()
    }

    async fn get_by_id(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, title, content::text AS content, rendered_snapshot, version, owner_id, collaborators, created_at, updated_at
            FROM notes
            WHERE id = $1
            "#
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Note::try_from).transpose()
    }

    async fn list_for_user(&self, user: UserId) -> Result<Vec<Note>, StoreError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, title, content::text AS content, rendered_snapshot, version, owner_id, collaborators, created_at, updated_at
            FROM notes
            WHERE owner_id = $1 OR $1 = ANY(collaborators)
            ORDER BY updated_at DESC, id ASC
            "#
        )
        .bind(user.into_inner())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Note::try_from).collect()
    }

    async fn conditional_update(&self, update: NoteUpdate) -> Result<Note, StoreError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            UPDATE notes
            SET title = $1,
                content = $2::json,
                rendered_snapshot = $3,
                collaborators = $4,
                version = version + 1,
                updated_at = GREATEST(NOW(), updated_at)
            WHERE id = $5 AND version = $6
            RETURNING id, title, content::text AS content, rendered_snapshot, version, owner_id, collaborators, created_at, updated_at
            "#
        )
        .bind(&update.title)
        .bind(update.content.as_str())
        .bind(&update.rendered_snapshot)
        .bind(collaborator_ids(&update.collaborators))
        .bind(update.id.into_inner())
        .bind(update.expected_version)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                tracing::debug!(note_id = %update.id, version = row.version, "Conditional update applied");
                row.try_into()
            }
            None => Err(StoreError::VersionConflict {
                id: update.id,
                expected: update.expected_version,
            }),
        }
    }

    async fn delete(&self, id: NoteId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
