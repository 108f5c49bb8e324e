use crate::core::{Pipeline, RenderedLog};
use crate::utils::error::Result;
use crate::utils::monitor::ProcessMonitor;

#[derive(Debug, Clone)]
pub struct RunOutput {
    /// `None` when the log was not written to storage.
    pub path: Option<String>,
    pub rendered: RenderedLog,
}

pub struct SimulationEngine<P: Pipeline> {
    pipeline: P,
    monitor: ProcessMonitor,
}

impl<P: Pipeline> SimulationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: ProcessMonitor::new(monitor_enabled),
        }
    }

    async fn produce(&self) -> Result<RenderedLog> {
        tracing::info!("🛠️ Generating drilling data...");
        let log = self.pipeline.generate().await?;
        tracing::info!("Generated {} samples", log.len());
        self.monitor.log_stats("Generate");

        let rendered = self.pipeline.render(log).await?;
        self.monitor.log_stats("Render");
        Ok(rendered)
    }

    /// Generate, render and export one log.
    pub async fn run(&self) -> Result<RunOutput> {
        let rendered = self.produce().await?;
        let path = self.pipeline.export(rendered.clone()).await?;
        self.monitor.log_stats("Export");
        Ok(RunOutput {
            path: Some(path),
            rendered,
        })
    }

    /// Generate and render without touching storage.
    pub async fn run_dry(&self) -> Result<RunOutput> {
        let rendered = self.produce().await?;
        Ok(RunOutput {
            path: None,
            rendered,
        })
    }

    /// 連續產生 `count` 份資料，每份完成即交給 `on_output`，任何一份失敗即中止
    ///
    /// Returns the number of logs handed to `on_output`.
    pub async fn run_batch<F>(&self, count: usize, export: bool, mut on_output: F) -> Result<usize>
    where
        F: FnMut(RunOutput) -> Result<()>,
    {
        for i in 1..=count {
            tracing::info!("▶️ Run {}/{}", i, count);
            let output = if export {
                self.run().await?
            } else {
                self.run_dry().await?
            };
            on_output(output)?;
        }
        self.monitor.log_final_stats();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::tests::{MockConfig, MockStorage};
    use crate::core::pipeline::GenerationPipeline;
    use crate::utils::error::SimError;

    #[tokio::test]
    async fn test_batch_writes_distinct_files() {
        let storage = MockStorage::new();
        let pipeline = GenerationPipeline::new(storage.clone(), MockConfig::new(Some(11)));
        let engine = SimulationEngine::new(pipeline);

        let mut paths = Vec::new();
        let produced = engine
            .run_batch(3, true, |output| {
                paths.extend(output.path);
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(produced, 3);
        assert_eq!(
            paths,
            vec![
                "mock/test_data_1.csv",
                "mock/test_data_2.csv",
                "mock/test_data_3.csv"
            ]
        );
        assert!(storage.get_file("test_data_3.csv").await.is_some());
    }

    #[tokio::test]
    async fn test_dry_run_leaves_storage_untouched() {
        let storage = MockStorage::new();
        let pipeline = GenerationPipeline::new(storage.clone(), MockConfig::new(Some(11)));
        let engine = SimulationEngine::new(pipeline);

        let mut outputs = Vec::new();
        engine
            .run_batch(2, false, |output| {
                outputs.push(output);
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|o| o.path.is_none()));
        assert!(storage.get_file("test_data_1.csv").await.is_none());
    }

    #[tokio::test]
    async fn test_batch_stops_when_consumer_fails() {
        let storage = MockStorage::new();
        let pipeline = GenerationPipeline::new(storage.clone(), MockConfig::new(Some(2)));
        let engine = SimulationEngine::new(pipeline);

        let mut seen = 0;
        let err = engine
            .run_batch(5, true, |_| {
                seen += 1;
                Err(SimError::ProcessingError {
                    message: "stdout closed".to_string(),
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SimError::ProcessingError { .. }));
        assert_eq!(seen, 1);
        assert!(storage.get_file("test_data_2.csv").await.is_none());
    }
}
