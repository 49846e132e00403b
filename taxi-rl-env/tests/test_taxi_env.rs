//! Reward rules of the taxi environment on the default city.
use anyhow::Result;
use taxi_rl_core::Env;
use taxi_rl_env::{TaxiAct, TaxiEnv, TaxiEnvConfig, TaxiState};

fn env_at(row: usize, col: usize, passenger_idx: usize, in_taxi: bool) -> TaxiEnv {
    let mut env = TaxiEnv::build(&TaxiEnvConfig::default(), 0).unwrap();
    env.set_state(TaxiState::new(row, col, passenger_idx, in_taxi));
    env
}

fn step(env: &mut TaxiEnv, act: TaxiAct) -> (TaxiState, f32, bool) {
    let (step, _) = env.step(&act);
    let state = env.codec().decode(step.obs.index());
    assert_eq!(state, env.state());
    (state, step.reward, step.is_terminated)
}

#[test]
fn test_pickup_and_dropoff() {
    // Passenger 0 waits at (1, 1)
    let mut env = env_at(0, 1, 0, false);

    // (1, 1) has no street direction, so only the step cost applies
    let (state, reward, done) = step(&mut env, TaxiAct::Down);
    assert_eq!(state, TaxiState::new(1, 1, 0, false));
    assert_eq!(reward, -1.0);
    assert!(!done);

    let (state, reward, done) = step(&mut env, TaxiAct::Pickup);
    assert_eq!(state, TaxiState::new(1, 1, 0, true));
    assert_eq!(reward, 15.0);
    assert!(!done);

    // Picking up again is illegal
    let (state, reward, _) = step(&mut env, TaxiAct::Pickup);
    assert!(state.in_taxi);
    assert_eq!(reward, -15.0);

    // Dropoff at (5, 5) with the passenger aboard
    env.set_state(TaxiState::new(5, 5, 0, true));
    let (state, reward, done) = step(&mut env, TaxiAct::Dropoff);
    assert_eq!(state, TaxiState::new(5, 5, 0, false));
    assert_eq!(reward, 30.0);
    assert!(done);
    assert!(env.is_done());
}

#[test]
fn test_illegal_pickup_and_dropoff() {
    // Pickup at the wrong location
    let mut env = env_at(1, 1, 1, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Pickup);
    assert!(!state.in_taxi);
    assert_eq!(reward, -15.0);

    // Pickup with the passenger already aboard
    let mut env = env_at(1, 1, 0, true);
    let (state, reward, _) = step(&mut env, TaxiAct::Pickup);
    assert!(state.in_taxi);
    assert_eq!(reward, -15.0);

    // Dropoff away from the dropoff cells
    let mut env = env_at(0, 1, 0, true);
    let (state, reward, done) = step(&mut env, TaxiAct::Dropoff);
    assert!(state.in_taxi);
    assert_eq!(reward, -15.0);
    assert!(!done);

    // Dropoff without the passenger replaces the dead-drop penalty too
    let mut env = env_at(5, 5, 0, false);
    let (_, reward, done) = step(&mut env, TaxiAct::Dropoff);
    assert_eq!(reward, -15.0);
    assert!(!done);
}

#[test]
fn test_wrong_way_penalty() {
    // (3, 2) is on a left-running street; moving right onto it costs 6
    let mut env = env_at(3, 1, 0, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Right);
    assert_eq!(state.cell(), (3, 2));
    assert_eq!(reward, -6.0);

    // Moving left along it costs 1
    let mut env = env_at(3, 2, 0, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Left);
    assert_eq!(state.cell(), (3, 1));
    assert_eq!(reward, -1.0);

    // Column 0 runs up
    let mut env = env_at(0, 0, 0, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Down);
    assert_eq!(state.cell(), (1, 0));
    assert_eq!(reward, -6.0);

    // Entering an intersection is never penalized
    let mut env = env_at(1, 0, 0, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Up);
    assert_eq!(state.cell(), (0, 0));
    assert_eq!(reward, -1.0);
}

#[test]
fn test_no_wrong_way_penalty_from_pickup() {
    // From the pickup at (4, 2), moving up onto (3, 2) is waived
    let mut env = env_at(4, 2, 0, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Up);
    assert_eq!(state.cell(), (3, 2));
    assert_eq!(reward, -1.0);
}

#[test]
fn test_blocked_wrong_way_move_is_penalized() -> Result<()> {
    // Clipped at the bottom boundary, the candidate stays at (9, 1), which runs left
    let mut env = env_at(9, 1, 0, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Down);
    assert_eq!(state.cell(), (9, 1));
    assert_eq!(reward, -6.0);

    // Clipped onto an intersection costs only the step
    let mut env = env_at(3, 0, 0, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Left);
    assert_eq!(state.cell(), (3, 0));
    assert_eq!(reward, -1.0);

    // An obstacle on a left-running street refuses the move but still penalizes it
    let config = TaxiEnvConfig::default().obstacles(vec![(3, 2)]);
    let mut env = TaxiEnv::build(&config, 0)?;
    env.set_state(TaxiState::new(3, 1, 0, false));
    let (state, reward, _) = step(&mut env, TaxiAct::Right);
    assert_eq!(state.cell(), (3, 1));
    assert_eq!(reward, -6.0);
    Ok(())
}

#[test]
fn test_obstacles_block_movement() {
    // (1, 2) is a block cell; the move is refused without extra penalty
    let mut env = env_at(1, 3, 0, false);
    let (state, reward, _) = step(&mut env, TaxiAct::Left);
    assert_eq!(state.cell(), (1, 3));
    assert_eq!(reward, -1.0);

    // A fixed cycle of moves never enters an obstacle
    let mut env = TaxiEnv::build(&TaxiEnvConfig::default(), 7).unwrap();
    for i in 0..2000usize {
        let act = TaxiAct::from(i * 7 % 4);
        let (step, _) = env.step(&act);
        let state = env.codec().decode(step.obs.index());
        assert!(!env.grid().is_obstacle(state.cell()));
        assert!(state.row < 10 && state.col < 10);
    }
}

#[test]
fn test_every_move_from_every_free_cell() {
    let mut env = TaxiEnv::build(&TaxiEnvConfig::default(), 0).unwrap();
    let n = env.grid().size();
    let moves = [
        (TaxiAct::Down, 1, 0),
        (TaxiAct::Up, -1, 0),
        (TaxiAct::Right, 0, 1),
        (TaxiAct::Left, 0, -1),
    ];

    for row in 0..n {
        for col in 0..n {
            if env.grid().is_obstacle((row, col)) {
                continue;
            }
            for &(act, dr, dc) in moves.iter() {
                let candidate = (
                    (row as i64 + dr).clamp(0, n as i64 - 1) as usize,
                    (col as i64 + dc).clamp(0, n as i64 - 1) as usize,
                );
                env.set_state(TaxiState::new(row, col, 0, false));
                let (state, _, done) = step(&mut env, act);

                assert!(state.row < n && state.col < n);
                assert!(!env.grid().is_obstacle(state.cell()));
                assert!(!done);
                assert_eq!((state.passenger_idx, state.in_taxi), (0, false));
                if env.grid().is_obstacle(candidate) {
                    assert_eq!(state.cell(), (row, col), "{} from {:?}", act, (row, col));
                } else {
                    assert_eq!(state.cell(), candidate, "{} from {:?}", act, (row, col));
                }
            }
        }
    }
}

#[test]
fn test_dead_drop_penalty() {
    // (4, 4) and (4, 5) are dropoffs; moving between them empty costs 6
    let mut env = env_at(4, 4, 0, false);
    let (state, reward, done) = step(&mut env, TaxiAct::Right);
    assert_eq!(state.cell(), (4, 5));
    assert_eq!(reward, -6.0);
    assert!(!done);

    // Carrying the passenger waives it
    let mut env = env_at(4, 4, 0, true);
    let (_, reward, _) = step(&mut env, TaxiAct::Right);
    assert_eq!(reward, -1.0);
}

#[test]
fn test_wrong_way_and_dead_drop_accumulate() -> Result<()> {
    // A dropoff on the left-running street at (3, 4), entered from the left
    let config = TaxiEnvConfig::default()
        .pickups(vec![(1, 1)])
        .dropoffs(vec![(3, 4)]);
    let mut env = TaxiEnv::build(&config, 0)?;
    env.set_state(TaxiState::new(3, 3, 0, false));

    let (state, reward, done) = step(&mut env, TaxiAct::Right);
    assert_eq!(state.cell(), (3, 4));
    assert_eq!(reward, -11.0);
    assert!(!done);
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = TaxiEnvConfig::default().pickups(vec![]);
    assert!(TaxiEnv::build(&config, 0).is_err());

    let config = TaxiEnvConfig::default().grid_size(5);
    assert!(TaxiEnv::build(&config, 0).is_err());
}

#[test]
fn test_reset_after_termination() -> Result<()> {
    let mut env = env_at(5, 5, 2, true);
    let (_, _, done) = step(&mut env, TaxiAct::Dropoff);
    assert!(done);

    let obs = env.reset()?;
    let state = env.codec().decode(obs.index());
    assert!(!env.is_done());
    assert!(!state.in_taxi);
    Ok(())
}
