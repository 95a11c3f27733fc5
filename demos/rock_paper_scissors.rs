//! Rock-paper-scissors as a cyclic reaction network. Mirrors the teacher
//! crate's `ROCK_PAPER_SCISSORS` preset, assembled through the algebraic
//! builder instead of parsed from a string, and fanned out across several
//! trajectories via `multi_simulate`.
//!
//! Reaction sides are sets, not multisets (stoichiometry >1 per species
//! per side is an explicit non-goal), so this cannot literally express
//! "winner doubles at the loser's expense." Instead each encounter just
//! consumes the loser, approximating the cyclic dynamic as a three-way
//! decay race rather than true population replacement.

use gillespie_crn::Vessel;

fn main() {
    let mut vessel = Vessel::new("rock_paper_scissors");
    let r = vessel.add_species("R", 50).unwrap();
    let p = vessel.add_species("P", 50).unwrap();
    let s = vessel.add_species("S", 50).unwrap();

    // R + P -> P, P + S -> S, S + R -> R
    vessel.add_rule(((r.clone() + p.clone()) >> 0.01).to(p.clone()));
    vessel.add_rule(((p.clone() + s.clone()) >> 0.01).to(s.clone()));
    vessel.add_rule(((s + r.clone()) >> 0.01).to(r));

    print!("{vessel}");

    let winners: Vec<usize> = vessel
        .multi_simulate(10, |trajectory| {
            let final_state = trajectory.last().expect("at least the initial snapshot");
            final_state
                .agent_count
                .iter()
                .enumerate()
                .max_by_key(|&(_, count)| *count)
                .map(|(token, _)| token)
                .unwrap_or(0)
        })
        .collect();

    println!("winning species token per run: {winners:?}");
}
