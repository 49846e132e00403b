use anyhow::Result;
use clap::Parser;
use std::{fs, path::Path};
use taxi_rl::search::{random_search, SearchConfig, SearchResult};

/// Random search over the hyperparameters of Q-learning in the taxi environment
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of trials
    #[arg(long, default_value_t = 100)]
    trials: usize,

    /// Number of training episodes of a trial
    #[arg(long, default_value_t = 2000)]
    episodes: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory where the trials and the best table are saved
    #[arg(long, default_value = "./taxi-rl/examples/model/search_taxi")]
    out_dir: String,
}

fn search(args: &Args) -> Result<SearchResult> {
    let config = SearchConfig::default()
        .n_trials(args.trials)
        .n_episodes(args.episodes)
        .seed(args.seed);
    let result = random_search(&config)?;

    let out_dir = Path::new(&args.out_dir);
    fs::create_dir_all(out_dir)?;
    fs::write(out_dir.join("search_config.yaml"), serde_yaml::to_string(&config)?)?;
    result.save_trials(out_dir.join("trials.yaml"))?;
    if let Some(q_table) = &result.best_q_table {
        q_table.save(out_dir.join("best_q_table.bin"))?;
    }

    if let Some(best) = result.best_trial() {
        println!(
            "Best trial {}: alpha = {:.4}, gamma = {:.4}, eps = {:.4}, average return = {:.3}",
            best.number, best.params.alpha, best.params.gamma, best.params.eps, best.average_return
        );
    }

    Ok(result)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    search(&args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{search, Args};
    use anyhow::Result;
    use std::path::Path;
    use tempdir::TempDir;

    #[test]
    fn test_search_taxi() -> Result<()> {
        let tmp_dir = TempDir::new("search_taxi")?;
        let out_dir = match tmp_dir.as_ref().to_str() {
            Some(s) => s,
            None => panic!("Failed to get string of temporary directory"),
        };
        let args = Args {
            trials: 2,
            episodes: 10,
            seed: 0,
            out_dir: out_dir.to_string(),
        };

        let result = search(&args)?;
        assert_eq!(result.trials.len(), 2);
        assert!(Path::new(out_dir).join("best_q_table.bin").exists());
        assert!(Path::new(out_dir).join("trials.yaml").exists());
        Ok(())
    }
}
