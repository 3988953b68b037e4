use crate::core::assigner;
use crate::domain::model::{Assignment, ExclusionRelation, Roster};
use crate::utils::error::{Result, SantaError};
use rand::Rng;
use std::num::NonZeroU32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome {
    Success { assignment: Assignment, attempts: u32 },
    Exhausted { attempts: u32 },
}

impl RetryOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Success { attempts, .. } | RetryOutcome::Exhausted { attempts } => {
                *attempts
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Success { .. })
    }

    pub fn into_result(self) -> Result<(Assignment, u32)> {
        match self {
            RetryOutcome::Success {
                assignment,
                attempts,
            } => Ok((assignment, attempts)),
            RetryOutcome::Exhausted { attempts } => Err(SantaError::ExhaustedRetries { attempts }),
        }
    }
}

/// Re-runs [`assigner::attempt`] until one succeeds or the cap is reached.
#[derive(Debug, Clone, Copy)]
pub struct RetryDriver {
    max_attempts: NonZeroU32,
}

impl RetryDriver {
    pub fn new(max_attempts: NonZeroU32) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> NonZeroU32 {
        self.max_attempts
    }

    pub fn run<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        exclusions: &ExclusionRelation,
        rng: &mut R,
    ) -> RetryOutcome {
        let max_attempts = self.max_attempts.get();
        let mut attempts = 0;

        while attempts < max_attempts {
            attempts += 1;
            match assigner::attempt(roster, exclusions, rng) {
                Ok(assignment) => {
                    tracing::info!("🎲 Assignment found on attempt {}", attempts);
                    return RetryOutcome::Success {
                        assignment,
                        attempts,
                    };
                }
                Err(infeasible) => {
                    tracing::info!("Attempt {} failed: {}. Retrying...", attempts, infeasible);
                }
            }
        }

        tracing::warn!("No valid assignment after {} attempts", attempts);
        RetryOutcome::Exhausted { attempts }
    }
}
