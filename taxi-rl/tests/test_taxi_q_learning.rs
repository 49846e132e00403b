//! Q-learning end to end on the default city.
use anyhow::Result;
use taxi_rl::{
    taxi_rl_agent::{GreedyPolicy, QLearning, QLearningConfig},
    taxi_rl_core::{
        record::{AggregateRecorder, NullRecorder},
        Agent, Configurable, DefaultEvaluator, Env, Evaluator, Policy, TabularEnv, Trainer,
        TrainerConfig,
    },
    taxi_rl_env::{TaxiEnv, TaxiEnvConfig, TaxiState},
};
use tempdir::TempDir;

const N_EPISODES: usize = 30000;

fn train(seed: u64) -> Result<QLearning<TaxiEnv>> {
    let env = TaxiEnv::build(&TaxiEnvConfig::default(), seed as i64)?;
    let config = QLearningConfig::default()
        .alpha(0.1)
        .gamma(0.6)
        .eps(0.1)
        .n_states(env.n_states())
        .n_actions(env.n_actions())
        .seed(seed);
    let mut agent = QLearning::<TaxiEnv>::build(config);
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(NullRecorder::new());

    let report = Trainer::build(TrainerConfig::default().max_episodes(N_EPISODES)).train(
        env,
        &mut agent,
        &mut recorder,
    )?;
    assert_eq!(report.len(), N_EPISODES);
    assert!(report.average_return().is_finite());

    Ok(agent)
}

#[test]
fn test_greedy_policy_delivers_passengers() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let agent = train(42)?;
    let q_table = agent.into_q_table();
    let before = q_table.clone();

    let mut evaluator = DefaultEvaluator::<TaxiEnv>::new(&TaxiEnvConfig::default(), 7, 100)?;
    let record = evaluator.evaluate(&mut GreedyPolicy::new(&q_table))?;
    let success_rate = record.get_scalar("success_rate")?;
    assert!(success_rate >= 0.8, "success rate = {}", success_rate);
    assert_eq!(q_table, before);

    // From a fixed start far from the passenger
    let mut env = TaxiEnv::build(&TaxiEnvConfig::default(), 0)?;
    let mut policy = GreedyPolicy::new(&q_table);
    let mut obs = env.set_state(TaxiState::new(0, 0, 1, false));
    let mut done = false;
    for _ in 0..200 {
        let (step, _) = env.step(&Policy::<TaxiEnv>::sample(&mut policy, &obs));
        if step.is_done() {
            done = true;
            break;
        }
        obs = step.obs;
    }
    assert!(done);
    Ok(())
}

#[test]
fn test_saved_table_evaluates_identically() -> Result<()> {
    let agent = train(3)?;
    let dir = TempDir::new("taxi_q_learning")?;
    agent.save_params(dir.path())?;

    let env = TaxiEnv::build(&TaxiEnvConfig::default(), 0)?;
    let config = QLearningConfig::default()
        .n_states(env.n_states())
        .n_actions(env.n_actions());
    let mut loaded = QLearning::<TaxiEnv>::build(config);
    loaded.load_params(dir.path())?;
    assert_eq!(loaded.q_table(), agent.q_table());

    let mut evaluator = DefaultEvaluator::from_env(env, 20);
    let r1 = evaluator.evaluate(&mut GreedyPolicy::new(agent.q_table()))?;
    let r2 = evaluator.evaluate(&mut GreedyPolicy::new(loaded.q_table()))?;
    assert_eq!(
        r1.get_scalar("episode_return")?,
        r2.get_scalar("episode_return")?
    );
    Ok(())
}
