//! Uniform random rollouts.
//!
//! Walks a state forward by picking uniformly among the legal actions, using
//! only the forward model's public surface. The agent draws from its own
//! generator, so the state's generator is consumed by game effects alone and
//! a rollout is reproducible from (state, agent seed).

use crate::core::{EngineError, GameRng, GameState};
use crate::forward::ForwardModel;
use crate::rules::RulesEngine;

/// Summary of one rollout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RolloutReport {
    /// Actions applied.
    pub steps: usize,
    /// Whether the game ended.
    pub terminal: bool,
    /// Deepest resolution stack seen.
    pub max_stack_depth: usize,
}

/// Random rollout driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomRollout {
    /// Stop after this many actions even if the game is still running.
    pub max_steps: usize,
}

impl Default for RandomRollout {
    fn default() -> Self {
        Self { max_steps: 10_000 }
    }
}

impl RandomRollout {
    /// Rollout capped at `max_steps` actions.
    #[must_use]
    pub fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }

    /// Play random actions on `state` until it ends or the cap is hit.
    pub fn run<R: RulesEngine>(
        &self,
        model: &ForwardModel<R>,
        state: &mut GameState<R>,
        agent: &mut GameRng,
    ) -> Result<RolloutReport, EngineError> {
        let mut report = RolloutReport::default();

        while report.steps < self.max_steps {
            let actions = model.legal_actions(state)?;
            let Some(action) = agent.choose(&actions) else {
                break;
            };
            model.apply(state, action)?;

            report.steps += 1;
            report.max_stack_depth = report.max_stack_depth.max(state.stack().depth());
        }

        report.terminal = state.is_terminal();
        tracing::debug!(
            steps = report.steps,
            terminal = report.terminal,
            max_stack_depth = report.max_stack_depth,
            "rollout finished"
        );
        Ok(report)
    }
}
