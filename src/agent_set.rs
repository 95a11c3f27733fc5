//! The algebraic builder: `AgentSet`, `AgentSetAndRate`, and `ReactionRule`.
//!
//! Reactions are written in chemical-equation form by combining these three
//! types with `+`, `>>`, and a final named `.to(...)` step:
//!
//! ```
//! use gillespie_crn::Vessel;
//!
//! let mut vessel = Vessel::new("decay");
//! let a = vessel.add_species("A", 3).unwrap();
//! let env = vessel.environment();
//! vessel.add_rule((a >> 1.0).to(env));
//! ```

use std::collections::BTreeSet;

use thiserror::Error;

/// A species' vessel-local integer identity.
pub type AgentToken = usize;

/// A nonnegative species population.
pub type AgentCount = u32;

/// Failure modes of [`AgentSet`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentSetError {
    /// [`AgentSet::token`] was called on a set whose size is not exactly 1.
    #[error("expected a single-species agent set")]
    SingletonExpected,
}

/// An unordered set of species tokens. The empty set denotes the
/// environment (source/sink).
///
/// Backed by a `BTreeSet` so iteration is always in ascending-token order,
/// which is the order pretty-printing requires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AgentSet(BTreeSet<AgentToken>);

impl AgentSet {
    /// The empty agent set, i.e. the environment.
    pub fn environment() -> Self {
        Self::default()
    }

    pub(crate) fn singleton(token: AgentToken) -> Self {
        let mut tokens = BTreeSet::new();
        tokens.insert(token);
        Self(tokens)
    }

    /// The tokens in this set, in ascending order.
    pub fn tokens(&self) -> impl Iterator<Item = AgentToken> + '_ {
        self.0.iter().copied()
    }

    /// Number of distinct species in this set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for the environment (the empty set).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The single token in this set. Fails unless exactly one is present.
    pub fn token(&self) -> Result<AgentToken, AgentSetError> {
        if self.0.len() != 1 {
            return Err(AgentSetError::SingletonExpected);
        }
        Ok(*self.0.iter().next().unwrap())
    }

    /// Attaches a rate, producing an [`AgentSetAndRate`]. Equivalent to the
    /// `>>` operator; provided as a named method for callers who prefer a
    /// fluent builder over the algebraic surface.
    pub fn rate(self, rate: f64) -> AgentSetAndRate {
        AgentSetAndRate {
            reactants: self,
            rate,
        }
    }
}

impl std::ops::Add for AgentSet {
    type Output = AgentSet;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.0.extend(rhs.0);
        self
    }
}

impl std::ops::Add for &AgentSet {
    type Output = AgentSet;

    fn add(self, rhs: Self) -> Self::Output {
        AgentSet(self.0.union(&rhs.0).copied().collect())
    }
}

impl std::ops::Shr<f64> for AgentSet {
    type Output = AgentSetAndRate;

    fn shr(self, rate: f64) -> Self::Output {
        self.rate(rate)
    }
}

impl FromIterator<AgentToken> for AgentSet {
    fn from_iter<I: IntoIterator<Item = AgentToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A reactant set with a rate constant attached, awaiting its products.
///
/// Produced by `reactants >> rate` or `reactants.rate(rate)`.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSetAndRate {
    reactants: AgentSet,
    rate: f64,
}

impl AgentSetAndRate {
    /// Completes the rule: `(reactants >> rate).to(products)`.
    ///
    /// This is the named-method equivalent of the source language's `>>=`
    /// operator: Rust's `ShrAssign` cannot produce a new value, so the final
    /// composition step is always spelled `.to(...)`.
    pub fn to(self, products: AgentSet) -> ReactionRule {
        ReactionRule {
            reactants: self.reactants,
            rate: self.rate,
            products,
        }
    }
}

/// An immutable mass-action reaction: `reactants` are consumed and
/// `products` are produced at stochastic rate `rate * product(reactant
/// populations)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionRule {
    reactants: AgentSet,
    rate: f64,
    products: AgentSet,
}

impl ReactionRule {
    /// The reactant side of the rule.
    pub fn reactants(&self) -> &AgentSet {
        &self.reactants
    }

    /// The rate constant.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The product side of the rule.
    pub fn products(&self) -> &AgentSet {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn union_is_idempotent_and_commutative() {
        let a = AgentSet::singleton(0);
        let b = AgentSet::singleton(1);
        assert_eq!(
            (&a + &a).tokens().collect::<Vec<_>>(),
            a.tokens().collect::<Vec<_>>()
        );
        assert_eq!((&a + &b).tokens().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!((&b + &a).tokens().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn union_flattens_duplicates() {
        let a = AgentSet::singleton(3);
        let doubled = a.clone() + a;
        assert_eq!(doubled.len(), 1);
    }

    #[test]
    fn token_requires_singleton() {
        let empty = AgentSet::environment();
        assert_eq!(empty.token().unwrap_err(), AgentSetError::SingletonExpected);

        let pair = AgentSet::singleton(0) + AgentSet::singleton(1);
        assert_eq!(pair.token().unwrap_err(), AgentSetError::SingletonExpected);

        assert_eq!(AgentSet::singleton(4).token().unwrap(), 4);
    }

    #[test]
    fn builder_precedence_matches_chemical_notation() {
        let a = AgentSet::singleton(0);
        let b = AgentSet::singleton(1);
        let c = AgentSet::singleton(2);
        let d = AgentSet::singleton(3);

        // (A + B) >> k .to(C + D)
        let rule = (a + b).rate(2.5).to(c + d);
        assert_eq!(rule.reactants().tokens().collect::<Vec<_>>(), vec![0, 1]);
        assert_relative_eq!(rule.rate(), 2.5);
        assert_eq!(rule.products().tokens().collect::<Vec<_>>(), vec![2, 3]);
    }
}
