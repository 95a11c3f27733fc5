//! The reaction network container: species registration, rule storage, and
//! the entry points into simulation and pretty-printing.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::agent_set::{AgentCount, AgentSet, AgentToken, ReactionRule};
use crate::multi_simulate::MultiSimulate;
use crate::simulation::{Network, Simulation};
use crate::symbol_table::SymbolTable;

/// Failure modes of [`Vessel`] mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VesselError {
    /// [`Vessel::add_species`] was called with a name already registered.
    #[error("species `{0}` is already registered")]
    DuplicateSpecies(String),
}

/// A population snapshot: the count of every species at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct VesselState {
    /// `agent_count[t]` is the population of the species with token `t`.
    pub agent_count: Vec<AgentCount>,
    /// Elapsed simulation time, monotonically non-decreasing along a
    /// trajectory.
    pub time: f64,
}

/// A named reaction network: species, their initial populations, and
/// mass-action rules between them.
///
/// Species and rules are added while building the vessel; once built, the
/// vessel is read-only and may be simulated any number of times, each
/// simulation producing an independent trajectory.
#[derive(Clone, Debug, Default)]
pub struct Vessel {
    name: String,
    species_symbols: SymbolTable<AgentToken, String>,
    initial_state: Vec<AgentCount>,
    rules: Vec<ReactionRule>,
}

impl Vessel {
    /// Creates an empty, named vessel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species_symbols: SymbolTable::new(),
            initial_state: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Registers a new species, returning the singleton [`AgentSet`]
    /// containing its freshly allocated token.
    ///
    /// Fails without modifying the vessel if `name` is already registered.
    pub fn add_species(
        &mut self,
        name: impl Into<String>,
        initial: AgentCount,
    ) -> Result<AgentSet, VesselError> {
        let name = name.into();
        let token = self.initial_state.len();
        self.species_symbols
            .store(token, name.clone())
            .map_err(|_| VesselError::DuplicateSpecies(name.clone()))?;
        self.initial_state.push(initial);
        log::trace!("registered species `{name}` as token {token} (initial = {initial})");
        Ok(AgentSet::singleton(token))
    }

    /// Adds a reaction rule to the network.
    pub fn add_rule(&mut self, rule: ReactionRule) {
        log::trace!(
            "added rule: {} reactant(s) -> {} product(s) at rate {}",
            rule.reactants().len(),
            rule.products().len(),
            rule.rate()
        );
        self.rules.push(rule);
    }

    /// The empty agent set: the environment, source and sink of reactions
    /// with no corresponding species on one side.
    pub fn environment(&self) -> AgentSet {
        AgentSet::environment()
    }

    /// The vessel's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The population of each species at `t = 0`, indexed by token.
    pub fn initial_state(&self) -> &[AgentCount] {
        &self.initial_state
    }

    /// The species name/token bijection.
    pub fn species_symbols(&self) -> &SymbolTable<AgentToken, String> {
        &self.species_symbols
    }

    /// The registered rules, in insertion order.
    pub fn rules(&self) -> &[ReactionRule] {
        &self.rules
    }

    fn network(&self) -> Arc<Network> {
        Arc::new(Network {
            rules: self.rules.clone(),
            initial_state: self.initial_state.clone(),
        })
    }

    /// Produces a fresh, independent trajectory, seeded from OS entropy.
    ///
    /// The returned iterator's first item is always `(initial_state, 0.0)`;
    /// it ends once no rule has positive propensity. Calling `simulate()`
    /// again starts a brand new, statistically independent trajectory.
    pub fn simulate(&self) -> Simulation<SmallRng> {
        log::debug!("starting simulation of vessel `{}`", self.name);
        Simulation::new(self.network(), SmallRng::from_entropy())
    }

    /// Like [`Vessel::simulate`], but with a caller-chosen seed for
    /// reproducible trajectories (e.g. in tests).
    pub fn simulate_seeded(&self, seed: u64) -> Simulation<SmallRng> {
        log::debug!(
            "starting seeded simulation of vessel `{}` (seed = {seed})",
            self.name
        );
        Simulation::new(self.network(), SmallRng::seed_from_u64(seed))
    }

    /// Runs `count` independent trajectories in parallel, each reduced by
    /// `f`, and returns their results lazily in submission order.
    ///
    /// `count` OS threads are spawned, each running its own `simulate()`
    /// stream through `f`. Pulling the `i`-th result only waits on the
    /// `i`-th worker, regardless of how long later workers take.
    pub fn multi_simulate<F, R>(&self, count: usize, f: F) -> MultiSimulate<R>
    where
        F: Fn(Simulation<SmallRng>) -> R + Send + Sync + 'static,
        R: Send + 'static,
    {
        log::debug!(
            "fanning out {count} simulations of vessel `{}`",
            self.name
        );
        MultiSimulate::spawn(self.network(), count, f)
    }

    fn render_side(&self, side: &AgentSet) -> String {
        if side.is_empty() {
            return "Environment".to_string();
        }
        side.tokens()
            .map(|t| self.species_symbols.lookup(&t).unwrap().clone())
            .join(" + ")
    }

    fn render_text(&self) -> String {
        let mut text = String::new();
        for rule in &self.rules {
            text.push_str(&self.render_side(rule.reactants()));
            text.push_str(&format!(" --{}> ", rule.rate()));
            text.push_str(&self.render_side(rule.products()));
            text.push('\n');
        }
        text
    }

    /// Writes the textual form: one line per rule, in insertion order,
    /// `<reactants> --<rate>> <products>`.
    pub fn pretty_print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render_text().as_bytes())
    }

    /// Writes a Graphviz DOT rendering of the network: one red `env` node,
    /// one cyan node per species, one yellow node per rule, and edges from
    /// each reactant into its rule and from each rule out to its products.
    pub fn pretty_print_dot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "digraph {{")?;
        writeln!(
            out,
            "  env [label=\"Environment\", style=filled, shape=box, color=red];"
        )?;
        for (token, name) in self.species_symbols.entries() {
            writeln!(
                out,
                "  s{token} [label=\"{name}\", style=filled, shape=box, color=cyan];"
            )?;
        }
        for (index, rule) in self.rules.iter().enumerate() {
            writeln!(
                out,
                "  r{index} [label=\"{}\", style=filled, shape=oval, color=yellow];",
                rule.rate()
            )?;
            if rule.reactants().is_empty() {
                writeln!(out, "  env -> r{index};")?;
            }
            for token in rule.reactants().tokens() {
                writeln!(out, "  s{token} -> r{index};")?;
            }
            if rule.products().is_empty() {
                writeln!(out, "  r{index} -> env;")?;
            }
            for token in rule.products().tokens() {
                writeln!(out, "  r{index} -> s{token};")?;
            }
        }
        writeln!(out, "}}")
    }
}

impl fmt::Display for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}
