//! Starting state and expected outcome of a configuration-driven test run.

use crate::configuration::snapshot::to_json_string;
use crate::configuration::{LayeredConfiguration, SharedConfiguration};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default)]
pub struct ConfigurationStub {
    /// State the run starts from; empty when unset.
    pub starting: Option<LayeredConfiguration>,
    /// State the run must end in; empty when unset.
    pub expected: Option<LayeredConfiguration>,
}

impl ConfigurationStub {
    pub fn new(starting: Option<LayeredConfiguration>, expected: Option<LayeredConfiguration>) -> Self {
        Self { starting, expected }
    }

    /// Fresh shared configuration seeded with the starting state.
    pub fn setup(&self) -> SharedConfiguration {
        SharedConfiguration::new(self.starting.clone().unwrap_or_default())
    }

    /// Compare the final state against the expected one.
    pub fn verify(&self, actual: &SharedConfiguration) -> Result<()> {
        let actual = actual.snapshot();
        let expected = self.expected.clone().unwrap_or_default();

        let actual_fingerprint = actual.fingerprint()?;
        let expected_fingerprint = expected.fingerprint()?;
        if actual_fingerprint == expected_fingerprint {
            tracing::debug!(fingerprint = %actual_fingerprint, "configuration matches expectation");
            return Ok(());
        }

        Err(ConfigError::Mismatch {
            expected: to_json_string(&expected)?,
            expected_fingerprint,
            actual: to_json_string(&actual)?,
            actual_fingerprint,
        })
    }
}
