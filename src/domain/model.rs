use serde::{Deserialize, Serialize};

pub const DEPTH_COLUMN: &str = "Depth (m)";

/// 模擬的鑽井參數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Rop,
    Rpm,
    FlowRate,
    WeightOnBit,
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::Rop,
        Parameter::Rpm,
        Parameter::FlowRate,
        Parameter::WeightOnBit,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Parameter::Rop => "ROP (m/h)",
            Parameter::Rpm => "RPM",
            Parameter::FlowRate => "Flow Rate (L/min)",
            Parameter::WeightOnBit => "Weight on Bit (tons)",
        }
    }

    /// Inclusive physical bounds of the channel.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Parameter::Rop => (2.0, 20.0),
            Parameter::Rpm => (60.0, 120.0),
            Parameter::FlowRate => (200.0, 400.0),
            Parameter::WeightOnBit => (5.0, 20.0),
        }
    }

    pub fn default_max_step(self) -> f64 {
        match self {
            Parameter::Rop => 0.5,
            Parameter::Rpm => 5.0,
            Parameter::FlowRate => 10.0,
            Parameter::WeightOnBit => 1.0,
        }
    }

    /// Accepted range for the configurable max step.
    pub fn max_step_limits(self) -> (f64, f64) {
        match self {
            Parameter::Rop => (0.1, 5.0),
            Parameter::Rpm => (1.0, 20.0),
            Parameter::FlowRate => (1.0, 50.0),
            Parameter::WeightOnBit => (0.1, 5.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRange {
    pub start_m: u32,
    pub end_m: u32,
    pub step_m: u32,
}

impl DepthRange {
    pub const MAX_DEPTH_M: u32 = 10_000;
    pub const MAX_STEP_M: u32 = 100;

    pub fn new(start_m: u32, end_m: u32, step_m: u32) -> Self {
        Self {
            start_m,
            end_m,
            step_m,
        }
    }

    /// Depths from `start_m` in `step_m` increments, every value below `end_m + step_m`.
    ///
    /// When the step does not divide the span the last depth lands past `end_m`.
    pub fn depths(&self) -> Vec<u32> {
        if self.step_m == 0 || self.end_m < self.start_m {
            return Vec::new();
        }
        let limit = self.end_m.saturating_add(self.step_m);
        (self.start_m..limit).step_by(self.step_m as usize).collect()
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self::new(500, 1000, 5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkSteps {
    pub rop: f64,
    pub rpm: f64,
    pub flow_rate: f64,
    pub weight_on_bit: f64,
}

impl WalkSteps {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Rop => self.rop,
            Parameter::Rpm => self.rpm,
            Parameter::FlowRate => self.flow_rate,
            Parameter::WeightOnBit => self.weight_on_bit,
        }
    }
}

impl Default for WalkSteps {
    fn default() -> Self {
        Self {
            rop: Parameter::Rop.default_max_step(),
            rpm: Parameter::Rpm.default_max_step(),
            flow_rate: Parameter::FlowRate.default_max_step(),
            weight_on_bit: Parameter::WeightOnBit.default_max_step(),
        }
    }
}

/// 單一深度的取樣，欄位順序即 CSV 欄位順序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillingSample {
    #[serde(rename = "Depth (m)")]
    pub depth_m: u32,
    #[serde(rename = "ROP (m/h)")]
    pub rop: f64,
    #[serde(rename = "RPM")]
    pub rpm: f64,
    #[serde(rename = "Flow Rate (L/min)")]
    pub flow_rate: f64,
    #[serde(rename = "Weight on Bit (tons)")]
    pub weight_on_bit: f64,
}

impl DrillingSample {
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Rop => self.rop,
            Parameter::Rpm => self.rpm,
            Parameter::FlowRate => self.flow_rate,
            Parameter::WeightOnBit => self.weight_on_bit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrillingLog {
    pub samples: Vec<DrillingSample>,
    pub seed: Option<u64>,
}

impl DrillingLog {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn channel(&self, parameter: Parameter) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(move |s| s.value(parameter))
    }
}

#[derive(Debug, Clone)]
pub struct RenderedLog {
    pub log: DrillingLog,
    pub csv_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_covers_500_to_1000() {
        let depths = DepthRange::default().depths();
        assert_eq!(depths.len(), 101);
        assert_eq!(depths.first(), Some(&500));
        assert_eq!(depths.last(), Some(&1000));
    }

    #[test]
    fn test_grid_with_non_dividing_step_passes_end() {
        let depths = DepthRange::new(500, 1000, 7).depths();
        assert_eq!(depths.last(), Some(&1004));
        assert!(depths.windows(2).all(|w| w[1] - w[0] == 7));
    }

    #[test]
    fn test_single_point_grid() {
        assert_eq!(DepthRange::new(800, 800, 10).depths(), vec![800]);
    }

    #[test]
    fn test_degenerate_ranges_are_empty() {
        assert!(DepthRange::new(900, 800, 10).depths().is_empty());
        assert!(DepthRange::new(800, 900, 0).depths().is_empty());
    }

    #[test]
    fn test_default_steps_match_parameters() {
        let steps = WalkSteps::default();
        for parameter in Parameter::ALL {
            assert_eq!(steps.get(parameter), parameter.default_max_step());
        }
    }
}
