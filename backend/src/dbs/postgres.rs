use crate::dbs::{Database, DbError, DbResult};
use async_trait::async_trait;
use shared::models::{ModelProvider, Personality};
use sqlx::{Pool, Postgres, Row, postgres::PgPoolOptions, postgres::PgRow};
use uuid::Uuid;

const COLUMNS: &str = "personality_id, provider, title, subtitle, character_prompt, oai_voice, \
     voice_prompt, is_doctor, is_child_voice, is_story, \"key\", creator_id, short_description, \
     pitch_factor, first_message_prompt";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn connect(database_url: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new().connect(database_url).await?;
        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    async fn init(&self) -> DbResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS personalities (
                personality_id UUID PRIMARY KEY,
                provider TEXT NOT NULL,
                title TEXT NOT NULL,
                subtitle TEXT NOT NULL,
                character_prompt TEXT NOT NULL,
                oai_voice TEXT NOT NULL,
                voice_prompt TEXT NOT NULL,
                is_doctor BOOLEAN NOT NULL,
                is_child_voice BOOLEAN NOT NULL,
                is_story BOOLEAN NOT NULL,
                \"key\" TEXT NOT NULL UNIQUE,
                creator_id UUID NOT NULL,
                short_description TEXT NOT NULL,
                pitch_factor DOUBLE PRECISION NOT NULL,
                first_message_prompt TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS personalities_creator_idx ON personalities (creator_id)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn parse_provider(raw: String) -> DbResult<ModelProvider> {
    Ok(serde_json::from_value(serde_json::Value::String(raw))?)
}

fn row_to_personality(row: PgRow) -> DbResult<Personality> {
    Ok(Personality {
        personality_id: row.get("personality_id"),
        provider: parse_provider(row.get("provider"))?,
        title: row.get("title"),
        subtitle: row.get("subtitle"),
        character_prompt: row.get("character_prompt"),
        oai_voice: row.get("oai_voice"),
        voice_prompt: row.get("voice_prompt"),
        is_doctor: row.get("is_doctor"),
        is_child_voice: row.get("is_child_voice"),
        is_story: row.get("is_story"),
        key: row.get("key"),
        creator_id: row.get("creator_id"),
        short_description: row.get("short_description"),
        pitch_factor: row.get("pitch_factor"),
        first_message_prompt: row.get("first_message_prompt"),
    })
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn get_personalities(&self, creator_id: Option<Uuid>) -> DbResult<Vec<Personality>> {
        let rows = match creator_id {
            Some(id) => {
                sqlx::query(&format!(
                    "SELECT {COLUMNS} FROM personalities WHERE creator_id = $1 ORDER BY title"
                ))
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!("SELECT {COLUMNS} FROM personalities ORDER BY title"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.into_iter().map(row_to_personality).collect()
    }

    async fn get_personality(&self, key: &str) -> DbResult<Personality> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM personalities WHERE \"key\" = $1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(key.to_string()))?;

        row_to_personality(row)
    }

    async fn create_personality(&self, personality: Personality) -> DbResult<()> {
        let result = sqlx::query(&format!(
            "INSERT INTO personalities ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"
        ))
        .bind(personality.personality_id)
        .bind(personality.provider.as_str())
        .bind(&personality.title)
        .bind(&personality.subtitle)
        .bind(&personality.character_prompt)
        .bind(&personality.oai_voice)
        .bind(&personality.voice_prompt)
        .bind(personality.is_doctor)
        .bind(personality.is_child_voice)
        .bind(personality.is_story)
        .bind(&personality.key)
        .bind(personality.creator_id)
        .bind(&personality.short_description)
        .bind(personality.pitch_factor)
        .bind(&personality.first_message_prompt)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DbError::Conflict(personality.key))
            }
            Err(e) => Err(e.into()),
        }
    }
}
