use crate::core::generator::Generator;
use crate::core::report;
use crate::core::{ConfigProvider, DrillingLog, Pipeline, RenderedLog, Storage};
use crate::utils::error::{Result, SimError};
use std::sync::Mutex;

/// 找不到可用編號時的上限，避免無窮迴圈
const MAX_FILE_INDEX: u32 = 100_000;

pub fn file_name(prefix: &str, index: u32) -> String {
    format!("{}_{}.csv", prefix, index)
}

pub struct GenerationPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    generator: Mutex<Generator>,
}

impl<S: Storage, C: ConfigProvider> GenerationPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let generator = Generator::new(config.seed());
        Self {
            storage,
            config,
            generator: Mutex::new(generator),
        }
    }

    /// Claims the lowest free `{prefix}_{n}.csv` and writes `data` there.
    pub async fn write_unique(&self, data: &[u8]) -> Result<String> {
        let prefix = self.config.file_prefix();
        for index in 1..=MAX_FILE_INDEX {
            let name = file_name(prefix, index);
            match self.storage.write_new(&name, data).await {
                Ok(()) => return Ok(self.storage.locate(&name)),
                Err(SimError::FileExistsError { path }) => {
                    tracing::debug!("{} already taken, trying next index", path);
                }
                Err(e) => return Err(e),
            }
        }

        Err(SimError::ProcessingError {
            message: format!(
                "No free file index for prefix '{}' below {}",
                prefix, MAX_FILE_INDEX
            ),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GenerationPipeline<S, C> {
    async fn generate(&self) -> Result<DrillingLog> {
        let range = self.config.depth_range();
        let steps = self.config.walk_steps();

        tracing::debug!(
            "Generating drilling log: {}m..{}m step {}m, steps {:?}",
            range.start_m,
            range.end_m,
            range.step_m,
            steps
        );

        let mut generator = self.generator.lock().map_err(|_| SimError::ProcessingError {
            message: "Random generator state poisoned".to_string(),
        })?;
        generator.generate(&range, &steps)
    }

    async fn render(&self, log: DrillingLog) -> Result<RenderedLog> {
        let csv_output = report::to_csv(&log)?;
        tracing::debug!("Rendered {} rows ({} bytes)", log.len(), csv_output.len());
        Ok(RenderedLog { log, csv_output })
    }

    async fn export(&self, rendered: RenderedLog) -> Result<String> {
        let path = self.write_unique(rendered.csv_output.as_bytes()).await?;
        tracing::info!("📁 Data exported to {}", path);
        Ok(path)
    }
}
