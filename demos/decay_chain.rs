//! A linear decay chain A -> B -> C -> ... , built with the algebraic
//! builder. Mirrors the teacher crate's `CHAIN` preset, but assembled
//! through `Vessel` rather than parsed from a string.

use gillespie_crn::Vessel;

fn main() {
    let mut vessel = Vessel::new("decay_chain");
    let names = ["A", "B", "C", "D", "E", "F"];

    let sets: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let initial = if i == 0 { 100 } else { 0 };
            vessel.add_species(*name, initial).unwrap()
        })
        .collect();

    for pair in sets.windows(2) {
        let (from, to) = (pair[0].clone(), pair[1].clone());
        vessel.add_rule((from >> 1.0).to(to));
    }

    print!("{vessel}");

    for state in vessel.simulate() {
        println!("t={:.3} {:?}", state.time, state.agent_count);
    }
}
