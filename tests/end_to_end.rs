//! End-to-end scenarios exercising a `Vessel` the way a caller would:
//! build a network, simulate it, and check the resulting trajectory.

use gillespie_crn::Vessel;

#[test]
fn empty_vessel_yields_one_terminal_snapshot() {
    let vessel = Vessel::new("empty");
    let trajectory: Vec<_> = vessel.simulate_seeded(0).collect();
    assert_eq!(trajectory.len(), 1);
    assert_eq!(trajectory[0].agent_count, Vec::<u32>::new());
    assert_eq!(trajectory[0].time, 0.0);
}

#[test]
fn no_active_reactions_terminates_immediately() {
    let mut vessel = Vessel::new("blocked");
    let a = vessel.add_species("A", 0).unwrap();
    let b = vessel.add_species("B", 0).unwrap();
    vessel.add_rule((a >> 1.0).to(b));

    let trajectory: Vec<_> = vessel.simulate_seeded(0).collect();
    assert_eq!(trajectory.len(), 1);
    assert_eq!(trajectory[0].agent_count, vec![0, 0]);
    assert_eq!(trajectory[0].time, 0.0);
}

#[test]
fn single_path_decay_visits_every_population_level() {
    let mut vessel = Vessel::new("decay");
    let a = vessel.add_species("A", 3).unwrap();
    let env = vessel.environment();
    vessel.add_rule((a >> 1.0).to(env));

    let trajectory: Vec<_> = vessel.simulate_seeded(42).collect();
    assert_eq!(trajectory.len(), 4);

    let counts: Vec<u32> = trajectory.iter().map(|s| s.agent_count[0]).collect();
    assert_eq!(counts, vec![3, 2, 1, 0]);

    for pair in trajectory.windows(2) {
        assert!(pair[1].time > pair[0].time);
    }
}

#[test]
fn time_is_monotone_and_counts_stay_non_negative() {
    let mut vessel = Vessel::new("birth_death");
    let a = vessel.add_species("A", 20).unwrap();
    vessel.add_rule((a.clone() >> 0.05).to(vessel.environment()));
    vessel.add_rule((vessel.environment() >> 1.0).to(a));

    let mut previous_time = 0.0;
    for (i, state) in vessel.simulate_seeded(7).take(500).enumerate() {
        assert!(state.time >= previous_time, "time went backwards at step {i}");
        previous_time = state.time;
    }
}

#[test]
fn conservation_holds_across_a_reversible_pair() {
    let mut vessel = Vessel::new("isomerization");
    let a = vessel.add_species("A", 10).unwrap();
    let b = vessel.add_species("B", 0).unwrap();
    vessel.add_rule((a.clone() >> 0.5).to(b.clone()));
    vessel.add_rule((b >> 0.5).to(a));

    for state in vessel.simulate_seeded(3).take(200) {
        let total: u32 = state.agent_count.iter().sum();
        assert_eq!(total, 10);
    }
}

#[test]
fn multi_simulate_produces_n_results_in_submission_order() {
    let mut vessel = Vessel::new("fan_out");
    let a = vessel.add_species("H", 5).unwrap();
    let env = vessel.environment();
    vessel.add_rule((a >> 2.0).to(env));

    let finals: Vec<u32> = vessel
        .multi_simulate(100, |trajectory| {
            trajectory
                .take_while(|s| s.time < 1_000.0)
                .last()
                .map(|s| s.agent_count[0])
                .unwrap_or(5)
        })
        .collect();

    assert_eq!(finals.len(), 100);
    // A pure decay process always reaches 0 given enough time.
    assert!(finals.iter().all(|&h| h == 0));
}

#[test]
fn pretty_print_reflects_insertion_and_token_order() {
    let mut vessel = Vessel::new("ab");
    let a = vessel.add_species("A", 1).unwrap();
    let b = vessel.add_species("B", 1).unwrap();
    vessel.add_rule(((a.clone() + b.clone()) >> 1.5).to(a + b));

    let mut buf = Vec::new();
    vessel.pretty_print(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "A + B --1.5> A + B\n");
}
