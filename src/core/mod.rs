pub mod engine;
pub mod generator;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{DrillingLog, DrillingSample, RenderedLog};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
