use crate::core::Storage;
use crate::utils::error::{Result, SimError};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// 寫入失敗時移除半成品，讓該編號可以被重新取得
async fn fill_or_discard<W>(writer: &mut W, path: &Path, data: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(data).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        tracing::warn!("⚠️ Write to {} failed, removing partial file", path.display());
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::debug!("Could not remove {}: {}", path.display(), remove_err);
        }
        return Err(SimError::IoError(e));
    }
    Ok(())
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_new(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // create_new 保證檔名只會被一個行程取得
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(SimError::FileExistsError {
                    path: full_path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        fill_or_discard(&mut file, &full_path, data).await
    }

    fn locate(&self, path: &str) -> String {
        self.base_path.join(path).display().to_string()
    }
}
