use anyhow::Result;
use clap::Parser;
use taxi_rl::{
    taxi_rl_agent::{evaluate_greedy, GreedyPolicy, QTable, QTableError},
    taxi_rl_core::{Env as _, Policy, TabularEnv},
    taxi_rl_env::{TaxiEnv, TaxiEnvConfig},
};

const MAX_STEPS_PER_EPISODE: usize = 200;

/// Evaluate a trained Q-table in the taxi environment
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path of the Q-table
    #[arg(
        long,
        default_value = "./taxi-rl/examples/model/q_learning_taxi/best/q_table.bin"
    )]
    q_table: String,

    /// Number of evaluation episodes
    #[arg(long, default_value_t = 100)]
    episodes: usize,

    /// Print every step of one episode
    #[arg(short, long, default_value_t = false)]
    render: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: i64,
}

fn load_q_table(path: &str, env: &TaxiEnv) -> Result<QTable> {
    match QTable::load_with_shape(path, env.n_states(), env.n_actions()) {
        Ok(q_table) => Ok(q_table),
        Err(QTableError::NotFound(path)) => Err(anyhow::anyhow!(
            "No Q-table at {:?}. Train an agent with the train_taxi example first.",
            path
        )),
        Err(e) => {
            Err(anyhow::Error::new(e).context(format!("Failed to load Q-table from {}", path)))
        }
    }
}

fn render_episode(env: &mut TaxiEnv, q_table: &QTable) -> Result<()> {
    let mut policy = GreedyPolicy::new(q_table);
    let mut obs = env.reset_with_index(0)?;
    println!("{}\n", env.snapshot());

    for _ in 0..MAX_STEPS_PER_EPISODE {
        let act = Policy::<TaxiEnv>::sample(&mut policy, &obs);
        let (step, _) = env.step(&act);
        println!("reward: {}\n{}\n", step.reward, env.snapshot());
        if step.is_done() {
            break;
        }
        obs = step.obs;
    }

    Ok(())
}

fn eval(args: &Args) -> Result<f32> {
    let mut env = TaxiEnv::build(&TaxiEnvConfig::default(), args.seed)?;
    let q_table = load_q_table(&args.q_table, &env)?;

    if args.render {
        render_episode(&mut env, &q_table)?;
    }

    let mean_return = evaluate_greedy(env, &q_table, args.episodes, MAX_STEPS_PER_EPISODE)?;
    log::info!(
        "Mean return of the greedy policy in {} episodes: {:.3}",
        args.episodes,
        mean_return
    );

    Ok(mean_return)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    eval(&args)?;
    Ok(())
}
