use crate::dbs::{Database, DbError, DbResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::Personality;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Default, Clone)]
struct LocalData {
    personalities: Vec<Personality>,
}

/// JSON-file store. The whole file is rewritten after every insert.
pub struct LocalDatabase {
    path: PathBuf,
    data: RwLock<LocalData>,
}

impl LocalDatabase {
    pub fn load(path: PathBuf) -> DbResult<Self> {
        let data = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LocalData::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read(&self) -> DbResult<RwLockReadGuard<'_, LocalData>> {
        self.data
            .read()
            .map_err(|_| DbError::Internal("local database lock poisoned".to_string()))
    }

    fn write(&self) -> DbResult<RwLockWriteGuard<'_, LocalData>> {
        self.data
            .write()
            .map_err(|_| DbError::Internal("local database lock poisoned".to_string()))
    }

    fn save(&self, data: &LocalData) -> DbResult<()> {
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[async_trait]
impl Database for LocalDatabase {
    async fn get_personalities(&self, creator_id: Option<Uuid>) -> DbResult<Vec<Personality>> {
        let db = self.read()?;
        Ok(db
            .personalities
            .iter()
            .filter(|p| creator_id.is_none_or(|id| p.creator_id == id))
            .cloned()
            .collect())
    }

    async fn get_personality(&self, key: &str) -> DbResult<Personality> {
        let db = self.read()?;
        db.personalities
            .iter()
            .find(|p| p.key == key)
            .cloned()
            .ok_or_else(|| DbError::NotFound(key.to_string()))
    }

    async fn create_personality(&self, personality: Personality) -> DbResult<()> {
        let mut db = self.write()?;
        if db.personalities.iter().any(|p| p.key == personality.key) {
            return Err(DbError::Conflict(personality.key));
        }
        db.personalities.push(personality);
        if let Err(e) = self.save(&db) {
            // keep memory and disk in step
            db.personalities.pop();
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ModelProvider;

    fn personality(key: &str, creator_id: Uuid) -> Personality {
        Personality {
            personality_id: Uuid::new_v4(),
            provider: ModelProvider::ElevenLabs,
            title: "Support Bot".to_string(),
            subtitle: String::new(),
            character_prompt: String::new(),
            oai_voice: "agent_1".to_string(),
            voice_prompt: String::new(),
            is_doctor: false,
            is_child_voice: false,
            is_story: false,
            key: key.to_string(),
            creator_id,
            short_description: String::new(),
            pitch_factor: 1.0,
            first_message_prompt: String::new(),
        }
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = LocalDatabase::load(dir.path().join("db.json")).unwrap();
        assert!(db.get_personalities(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn inserts_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let creator = Uuid::new_v4();

        let db = LocalDatabase::load(path.clone()).unwrap();
        db.create_personality(personality("bot_a", creator)).await.unwrap();
        db.create_personality(personality("bot_b", Uuid::new_v4()))
            .await
            .unwrap();

        let reloaded = LocalDatabase::load(path).unwrap();
        assert_eq!(reloaded.get_personalities(None).await.unwrap().len(), 2);
        let mine = reloaded.get_personalities(Some(creator)).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].key, "bot_a");
    }

    #[tokio::test]
    async fn duplicate_key_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let db = LocalDatabase::load(dir.path().join("db.json")).unwrap();
        let creator = Uuid::new_v4();
        db.create_personality(personality("bot", creator)).await.unwrap();

        let err = db
            .create_personality(personality("bot", creator))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict(k) if k == "bot"));
        assert_eq!(db.get_personalities(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let db = LocalDatabase::load(dir.path().join("db.json")).unwrap();
        assert!(matches!(
            db.get_personality("nope").await,
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(LocalDatabase::load(path), Err(DbError::Serde(_))));
    }
}
