use crate::domain::model::{DepthRange, DrillingLog, RenderedLog, WalkSteps};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Writes `data` to a path that must not exist yet.
    ///
    /// Fails with `SimError::FileExistsError` instead of overwriting.
    fn write_new(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Human readable location of `path`, used for reporting.
    fn locate(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn depth_range(&self) -> DepthRange;
    fn walk_steps(&self) -> WalkSteps;
    fn output_dir(&self) -> &str;
    fn file_prefix(&self) -> &str;
    fn seed(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn generate(&self) -> Result<DrillingLog>;
    async fn render(&self, log: DrillingLog) -> Result<RenderedLog>;
    async fn export(&self, rendered: RenderedLog) -> Result<String>;
}
