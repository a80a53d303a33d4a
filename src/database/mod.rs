use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::Brain;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("brain file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("brain file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Весь стейт бота в одном JSON-файле. Каждое сохранение переписывает файл целиком.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Читает файл. Нет файла - пустой корень, нет ключа `users` - он добавляется.
    pub async fn load(&self) -> Result<Brain, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Brain::default()),
            Err(e) => return Err(e.into()),
        };

        let mut value: Value = serde_json::from_slice(&raw)?;
        if let Some(root) = value.as_object_mut() {
            let healthy = root.get("users").is_some_and(|users| users.is_object());
            if !healthy {
                log::warn!("🩹 {} has no users map, healing", self.path.display());
                root.insert("users".to_string(), Value::Object(Default::default()));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub async fn save(&self, brain: &Brain) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write(brain).await
    }

    /// Пишет во временный файл рядом и переименовывает поверх основного,
    /// так что `load` всегда видит файл целиком. Вызывать под `write_lock`.
    async fn write(&self, brain: &Brain) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(brain)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("💾 Brain saved: {} users", brain.users.len());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "brain.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// load → изменение → save под одной блокировкой, чтобы параллельные
    /// обработчики не затирали друг друга.
    pub async fn update<R, F>(&self, mutate: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Brain) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut brain = self.load().await?;
        let result = mutate(&mut brain);
        self.write(&brain).await?;
        Ok(result)
    }
}
