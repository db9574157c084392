use contact_shared_contracts::fault::FaultService;
use rand::Rng;
use tracing::trace;

#[derive(Debug, Clone, Copy, Default)]
pub struct FaultServiceImpl {
    config: FaultServiceConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum FaultServiceConfig {
    #[default]
    Disabled,
    /// Fail with the given probability, which must lie within `0.0..=1.0`.
    Enabled { probability: f64 },
}

impl FaultServiceImpl {
    pub fn new(config: FaultServiceConfig) -> Self {
        Self { config }
    }
}

impl FaultService for FaultServiceImpl {
    fn should_fail(&self) -> bool {
        match self.config {
            FaultServiceConfig::Disabled => false,
            FaultServiceConfig::Enabled { probability } => {
                let fail = rand::thread_rng().gen_bool(probability.clamp(0.0, 1.0));
                trace!(probability, fail, "rolled fault injection");
                fail
            }
        }
    }
}
