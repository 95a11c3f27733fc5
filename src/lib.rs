//! # gillespie-crn
//!
//! A library for stochastically simulating chemical reaction networks with
//! Gillespie's direct method.
//!
//! A [`Vessel`] is built up by registering species and mass-action rules in
//! chemical-equation form, then [`Vessel::simulate`] produces a lazy,
//! restartable trajectory, and [`Vessel::multi_simulate`] fans a trajectory
//! out across `N` OS threads.
//!
//! ```
//! use gillespie_crn::Vessel;
//!
//! let mut vessel = Vessel::new("decay");
//! let a = vessel.add_species("A", 3).unwrap();
//! let env = vessel.environment();
//! vessel.add_rule((a >> 1.0).to(env));
//!
//! let trajectory: Vec<_> = vessel.simulate_seeded(1).collect();
//! assert_eq!(trajectory.first().unwrap().agent_count, vec![3]);
//! assert_eq!(trajectory.last().unwrap().agent_count, vec![0]);
//! ```

#![warn(missing_docs)]

mod agent_set;
mod multi_simulate;
mod simulation;
mod symbol_table;
mod vessel;

pub use agent_set::{
    AgentCount, AgentSet, AgentSetAndRate, AgentSetError, AgentToken, ReactionRule,
};
pub use multi_simulate::MultiSimulate;
pub use simulation::Simulation;
pub use symbol_table::{SymbolTable, SymbolTableError};
pub use vessel::{Vessel, VesselError, VesselState};
