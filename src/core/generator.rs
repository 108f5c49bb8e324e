use crate::domain::model::{DepthRange, DrillingLog, DrillingSample, Parameter, WalkSteps};
use crate::utils::error::{Result, SimError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bounded random walk: uniform start inside the bounds, then
/// `clamp(prev + U[-max_step, max_step], min, max)` per sample.
pub fn random_walk<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    bounds: (f64, f64),
    max_step: f64,
) -> Vec<f64> {
    let (min, max) = bounds;
    let mut values = Vec::with_capacity(len);
    if len == 0 {
        return values;
    }

    let mut current = rng.gen_range(min..=max);
    values.push(current);
    for _ in 1..len {
        let delta = rng.gen_range(-max_step..=max_step);
        current = (current + delta).clamp(min, max);
        values.push(current);
    }
    values
}

pub fn generate_log<R: Rng + ?Sized>(
    range: &DepthRange,
    steps: &WalkSteps,
    rng: &mut R,
) -> Result<DrillingLog> {
    let depths = range.depths();
    if depths.is_empty() {
        return Err(SimError::ProcessingError {
            message: format!(
                "Depth range {}..{} with step {} produces no samples",
                range.start_m, range.end_m, range.step_m
            ),
        });
    }

    for parameter in Parameter::ALL {
        let step = steps.get(parameter);
        if !step.is_finite() || step < 0.0 {
            return Err(SimError::ProcessingError {
                message: format!("Invalid max step {} for {}", step, parameter.column()),
            });
        }
    }

    // 各參數獨立漫步，順序固定以確保同一種子可重現
    let rop = random_walk(rng, depths.len(), Parameter::Rop.bounds(), steps.rop);
    let rpm = random_walk(rng, depths.len(), Parameter::Rpm.bounds(), steps.rpm);
    let flow_rate = random_walk(
        rng,
        depths.len(),
        Parameter::FlowRate.bounds(),
        steps.flow_rate,
    );
    let weight_on_bit = random_walk(
        rng,
        depths.len(),
        Parameter::WeightOnBit.bounds(),
        steps.weight_on_bit,
    );

    let samples = depths
        .into_iter()
        .enumerate()
        .map(|(i, depth_m)| DrillingSample {
            depth_m,
            rop: rop[i],
            rpm: rpm[i],
            flow_rate: flow_rate[i],
            weight_on_bit: weight_on_bit[i],
        })
        .collect();

    Ok(DrillingLog {
        samples,
        seed: None,
    })
}

/// Owns the RNG so repeated logs in one run continue the same stream.
pub struct Generator {
    rng: StdRng,
    seed: Option<u64>,
}

impl Generator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, seed }
    }

    pub fn generate(&mut self, range: &DepthRange, steps: &WalkSteps) -> Result<DrillingLog> {
        let mut log = generate_log(range, steps, &mut self.rng)?;
        log.seed = self.seed;
        tracing::debug!(
            "Generated {} samples ({}m..{}m, seed: {:?})",
            log.len(),
            range.start_m,
            range.end_m,
            self.seed
        );
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(log: &DrillingLog, steps: &WalkSteps) {
        for parameter in Parameter::ALL {
            let (min, max) = parameter.bounds();
            let values: Vec<f64> = log.channel(parameter).collect();
            assert!(
                values.iter().all(|v| *v >= min && *v <= max),
                "{} out of bounds",
                parameter.column()
            );
            let max_step = steps.get(parameter);
            assert!(
                values
                    .windows(2)
                    .all(|w| (w[1] - w[0]).abs() <= max_step + 1e-9),
                "{} step too large",
                parameter.column()
            );
        }
    }

    #[test]
    fn test_walk_respects_bounds_and_steps() {
        let range = DepthRange::default();
        let steps = WalkSteps::default();
        for seed in 0..50 {
            let mut generator = Generator::new(Some(seed));
            let log = generator.generate(&range, &steps).unwrap();
            assert_eq!(log.len(), 101);
            assert_invariants(&log, &steps);
        }
    }

    #[test]
    fn test_large_steps_still_clamped() {
        let range = DepthRange::new(0, 2000, 1);
        let steps = WalkSteps {
            rop: 5.0,
            rpm: 20.0,
            flow_rate: 50.0,
            weight_on_bit: 5.0,
        };
        let mut generator = Generator::new(Some(7));
        let log = generator.generate(&range, &steps).unwrap();
        assert_eq!(log.len(), 2001);
        assert_invariants(&log, &steps);
    }

    #[test]
    fn test_same_seed_reproduces_log() {
        let range = DepthRange::default();
        let steps = WalkSteps::default();
        let a = Generator::new(Some(42)).generate(&range, &steps).unwrap();
        let b = Generator::new(Some(42)).generate(&range, &steps).unwrap();
        let c = Generator::new(Some(43)).generate(&range, &steps).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.samples, c.samples);
        assert_eq!(a.seed, Some(42));
    }

    #[test]
    fn test_zero_step_keeps_value_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = random_walk(&mut rng, 20, (5.0, 20.0), 0.0);
        assert!(values.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_empty_grid_is_an_error() {
        let mut generator = Generator::new(Some(1));
        let err = generator
            .generate(&DepthRange::new(1000, 500, 5), &WalkSteps::default())
            .unwrap_err();
        assert!(matches!(err, SimError::ProcessingError { .. }));
    }

    #[test]
    fn test_negative_step_is_an_error() {
        let steps = WalkSteps {
            rop: -1.0,
            ..WalkSteps::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_log(&DepthRange::default(), &steps, &mut rng).is_err());
    }
}
