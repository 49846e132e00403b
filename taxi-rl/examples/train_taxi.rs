use anyhow::Result;
use clap::Parser;
use std::{fs, path::Path};
use taxi_rl::{
    taxi_rl_agent::{EpsilonGreedy, QLearning, QLearningConfig},
    taxi_rl_core::{
        record::{AggregateRecorder, BufferedRecorder},
        Agent, Configurable, DefaultEvaluator, Env as _, TabularEnv, TrainReport, Trainer,
        TrainerConfig,
    },
    taxi_rl_env::{TaxiEnv, TaxiEnvConfig},
};

const N_EPISODES_PER_EVAL: usize = 100;
const MAX_STEPS_PER_EPISODE: usize = 200;

mod config {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    pub struct TrainTaxiConfig {
        pub env_config: TaxiEnvConfig,
        pub agent_config: QLearningConfig,
        pub trainer_config: TrainerConfig,
    }

    impl TrainTaxiConfig {
        pub fn new(args: &Args, n_states: usize, n_actions: usize) -> Self {
            let explorer = match args.decay_rate {
                Some(rate) => EpsilonGreedy::with_decay(args.eps, rate),
                None => EpsilonGreedy::new(args.eps),
            };
            let agent_config = QLearningConfig::default()
                .alpha(args.alpha)
                .gamma(args.gamma)
                .explorer(explorer)
                .n_states(n_states)
                .n_actions(n_actions)
                .seed(args.seed);
            let trainer_config = TrainerConfig::default()
                .max_episodes(args.episodes)
                .max_steps_per_episode(MAX_STEPS_PER_EPISODE)
                .eval_interval(args.eval_interval)
                .flush_record_interval(args.eval_interval)
                .save_interval(args.episodes)
                .model_dir(args.model_dir.clone());
            Self {
                env_config: TaxiEnvConfig::default(),
                agent_config,
                trainer_config,
            }
        }

        pub fn save(&self, model_dir: &str) -> Result<()> {
            fs::create_dir_all(model_dir)?;
            let path = Path::new(model_dir).join("config.yaml");
            fs::write(path, serde_yaml::to_string(self)?)?;
            Ok(())
        }
    }
}

/// Train Q-learning agent in the taxi environment
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of training episodes
    #[arg(long, default_value_t = 30000)]
    episodes: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    alpha: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.6)]
    gamma: f64,

    /// Exploration rate, the starting value with --decay-rate
    #[arg(long, default_value_t = 0.1)]
    eps: f64,

    /// Decay epsilon exponentially at this rate after the first episode
    #[arg(long)]
    decay_rate: Option<f64>,

    /// Evaluate the greedy policy every this many episodes
    #[arg(long, default_value_t = 1000)]
    eval_interval: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory where the table and configuration are saved
    #[arg(long, default_value = "./taxi-rl/examples/model/q_learning_taxi")]
    model_dir: String,
}

fn train(args: &Args) -> Result<TrainReport> {
    let env = TaxiEnv::build(&TaxiEnvConfig::default(), args.seed as i64)?;
    let config = config::TrainTaxiConfig::new(args, env.n_states(), env.n_actions());
    config.save(&args.model_dir)?;

    let mut agent = QLearning::<TaxiEnv>::build(config.agent_config.clone());
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(BufferedRecorder::new());
    let mut evaluator = DefaultEvaluator::<TaxiEnv>::new(
        &config.env_config,
        args.seed as i64 + 1,
        N_EPISODES_PER_EVAL,
    )?
    .max_steps(MAX_STEPS_PER_EPISODE);
    let mut trainer = Trainer::build(config.trainer_config);

    let report = trainer.train_with_eval(env, &mut agent, &mut recorder, &mut evaluator)?;
    agent.save_params(Path::new(&args.model_dir))?;

    log::info!(
        "Average return of the last 100 episodes: {:.3}, success rate: {:.3}",
        report.average_return(),
        report.success_rate()
    );

    Ok(report)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    train(&args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{config::TrainTaxiConfig, train, Args};
    use anyhow::Result;
    use std::path::Path;
    use tempdir::TempDir;

    #[test]
    fn test_train_taxi() -> Result<()> {
        let tmp_dir = TempDir::new("train_taxi")?;
        let model_dir = match tmp_dir.as_ref().to_str() {
            Some(s) => s,
            None => panic!("Failed to get string of temporary directory"),
        };
        let args = Args {
            episodes: 20,
            alpha: 0.1,
            gamma: 0.6,
            eps: 0.1,
            decay_rate: None,
            eval_interval: 10,
            seed: 42,
            model_dir: model_dir.to_string(),
        };

        let report = train(&args)?;
        assert_eq!(report.len(), 20);
        assert!(Path::new(model_dir).join("q_table.bin").exists());
        assert!(Path::new(model_dir).join("best").join("q_table.bin").exists());
        assert!(Path::new(model_dir).join("20").join("q_table.bin").exists());
        assert!(Path::new(model_dir).join("config.yaml").exists());
        Ok(())
    }

    #[test]
    fn test_decay_rate_starts_from_eps() {
        let args = Args {
            episodes: 20,
            alpha: 0.1,
            gamma: 0.6,
            eps: 0.4,
            decay_rate: Some(0.005),
            eval_interval: 10,
            seed: 42,
            model_dir: "unused".to_string(),
        };

        let config = TrainTaxiConfig::new(&args, 500, 6);
        assert_eq!(config.agent_config.explorer.eps, 0.4);
        assert_eq!(config.agent_config.explorer.decay_rate, Some(0.005));
    }
}
