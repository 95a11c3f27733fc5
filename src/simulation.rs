//! The SSA driver: a lazy, restartable trajectory over a [`Network`].

use std::sync::Arc;

use rand::Rng;
use rand_distr::{Distribution, Exp};

use crate::agent_set::AgentCount;
use crate::vessel::VesselState;

/// The immutable parts of a [`crate::Vessel`] a trajectory needs: its rules
/// and its initial population. Cloned once out of the vessel per `simulate`
/// call and shared (via `Arc`) read-only across every worker in a
/// `multi_simulate` fan-out.
pub(crate) struct Network {
    pub(crate) rules: Vec<crate::agent_set::ReactionRule>,
    pub(crate) initial_state: Vec<AgentCount>,
}

/// A single, lazily-stepped trajectory produced by [`crate::Vessel::simulate`]
/// or [`crate::Vessel::simulate_seeded`].
///
/// Implements [`Iterator`]: the first item is the initial state at `t = 0`,
/// and each subsequent item is the state immediately after one reaction
/// fires. The iterator ends once no rule has positive propensity.
pub struct Simulation<R> {
    network: Arc<Network>,
    state: VesselState,
    rng: R,
    started: bool,
    finished: bool,
}

impl<R: Rng> Simulation<R> {
    pub(crate) fn new(network: Arc<Network>, rng: R) -> Self {
        let state = VesselState {
            agent_count: network.initial_state.clone(),
            time: 0.0,
        };
        Self {
            network,
            state,
            rng,
            started: false,
            finished: false,
        }
    }

    /// Runs one step of the direct method: draws a candidate exponential
    /// delay for every rule with positive propensity, picks the smallest
    /// (ties broken by lowest rule index), advances time, and applies the
    /// net stoichiometry. Returns `None` once no rule is active.
    fn step(&mut self) -> Option<()> {
        let mut best: Option<(usize, f64)> = None;

        for (index, rule) in self.network.rules.iter().enumerate() {
            let propensity_factor: u64 = rule
                .reactants()
                .tokens()
                .map(|t| u64::from(self.state.agent_count[t]))
                .product();
            if propensity_factor == 0 {
                continue;
            }
            let mean_rate = propensity_factor as f64 * rule.rate();
            if !(mean_rate > 0.0) {
                continue;
            }
            let distribution = Exp::new(mean_rate).expect("rate is positive and finite");
            let delay = distribution.sample(&mut self.rng);
            if best.map_or(true, |(_, best_delay)| delay < best_delay) {
                best = Some((index, delay));
            }
        }

        let (index, delay) = best?;
        let rule = &self.network.rules[index];

        self.state.time += delay;
        for reactant in rule.reactants().tokens() {
            if !rule.products().tokens().any(|p| p == reactant) {
                self.state.agent_count[reactant] -= 1;
            }
        }
        for product in rule.products().tokens() {
            if !rule.reactants().tokens().any(|r| r == product) {
                self.state.agent_count[product] += 1;
            }
        }
        Some(())
    }
}

impl<R: Rng> Iterator for Simulation<R> {
    type Item = VesselState;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.state.clone());
        }
        if self.finished {
            return None;
        }
        match self.step() {
            Some(()) => Some(self.state.clone()),
            None => {
                self.finished = true;
                None
            }
        }
    }
}
