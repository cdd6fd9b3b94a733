use std::env;

use racetrack_env::{Car, EnvConfig, Racetrack};
use racetrack_solvers::{QLearning, Sarsa, Solver, SolverConfig, Trajectory, ValueIteration};

const DEFAULT_TRACK: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../racetrack-env/tracks/l_track.txt"
);

fn summarize(name: &str, records: usize, trajectory: &Trajectory) {
    println!(
        "{name}: training_records={records} test_steps={} finished={}",
        trajectory.steps(),
        trajectory.is_finished()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = env::args().skip(1);
    let track_path = args.next().unwrap_or_else(|| DEFAULT_TRACK.to_string());
    let env_config = match args.next() {
        Some(path) => EnvConfig::from_yaml_path(path).expect("env config failed to load"),
        None => EnvConfig::from_default_yaml().expect("default env config failed to parse"),
    };
    let solver_config = SolverConfig {
        seed: Some(0),
        ..SolverConfig::from_default_yaml().expect("default solver config failed to parse")
    };

    let track = Racetrack::from_path(&track_path, &env_config).expect("track failed to load");
    println!(
        "track={track_path} size={}x{} actions={}",
        track.map().width(),
        track.map().height(),
        track.actions().len()
    );

    let mut value_iteration = ValueIteration::new(Car::from_racetrack(&track), &solver_config)
        .expect("solver config is valid");
    let report = value_iteration.train().expect("value iteration failed");
    let trajectory = value_iteration.test().expect("value iteration test failed");
    summarize("value_iteration", report.len(), &trajectory);

    let mut q_learning = QLearning::new(Car::from_racetrack(&track), &solver_config)
        .expect("solver config is valid");
    let report = q_learning.train().expect("q-learning failed");
    let trajectory = q_learning.test().expect("q-learning test failed");
    summarize("q_learning", report.len(), &trajectory);

    let mut sarsa = Sarsa::new(Car::from_racetrack(&track), &solver_config)
        .expect("solver config is valid");
    let report = sarsa.train().expect("sarsa failed");
    let trajectory = sarsa.test().expect("sarsa test failed");
    summarize("sarsa", report.len(), &trajectory);
    println!(
        "sarsa_mean_steps={:.2}",
        report.mean_steps().unwrap_or_default()
    );
}
