use crate::config::task::TaskConfig;
use crate::exec::generator::{random_seed, OfflineGenerator, OnlineGenerator};
use crate::exec::program::Program;
use crate::exec::solution::Solution;
use crate::judge::judge_for;
use crate::utils::paths::{data_dir, input_name};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Task directory holding programs, scorebox.json, data/ and build/
    #[arg(long, global = true, default_value = ".")]
    task_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a solution on an input file and score it with the task's judge
    Evaluate {
        /// Solution program name (extension optional)
        solution: String,
        /// Input file fed to the solution on stdin
        #[arg(long)]
        input: PathBuf,
        /// Known-correct output
        #[arg(long)]
        reference: Option<PathBuf>,
        /// Wall clock limit in seconds, overrides scorebox.json
        #[arg(long)]
        timeout: Option<f64>,
        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a program attached to the terminal
    Run {
        /// Program name (extension optional)
        program: String,
        /// Arguments passed to the program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Produce test input with a generator program
    Generate {
        /// Generator program name (extension optional)
        generator: String,
        /// Subtask number passed to an online generator
        #[arg(long, required_unless_present = "offline")]
        subtask: Option<u32>,
        /// Seed in hex; drawn at random when omitted
        #[arg(long, value_parser = parse_hex_seed, conflicts_with = "offline")]
        seed: Option<u64>,
        /// File receiving the generated input; defaults to data/<seed>_<subtask>.in
        #[arg(long, conflicts_with = "offline")]
        output: Option<PathBuf>,
        /// Run as an offline generator writing every input into DIR
        #[arg(long, value_name = "DIR", conflicts_with = "subtask")]
        offline: Option<PathBuf>,
    },
}

fn parse_hex_seed(raw: &str) -> std::result::Result<u64, String> {
    let digits = raw.trim_start_matches("0x");
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid hex seed '{}': {}", raw, e))
}

pub fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let task_dir = cli.task_dir;
    log::debug!("Task directory: {}", task_dir.display());

    match cli.command {
        Commands::Evaluate {
            solution,
            input,
            reference,
            timeout,
            json,
        } => evaluate(&task_dir, &solution, &input, reference.as_deref(), timeout, json),
        Commands::Run { program, args } => {
            let outcome = Program::new(&task_dir, &program).run(&args)?;
            if !outcome.is_ok() {
                eprintln!("{} finished with {}", program, outcome);
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Generate {
            generator,
            subtask,
            seed,
            output,
            offline,
        } => generate(&task_dir, &generator, subtask, seed, output, offline),
    }
}

fn evaluate(
    task_dir: &Path,
    solution_name: &str,
    input: &Path,
    reference: Option<&Path>,
    timeout: Option<f64>,
    json: bool,
) -> Result<()> {
    let config = TaskConfig::load_or_default(task_dir)?;
    let mut run_config = config.run_config();
    if let Some(secs) = timeout {
        let limit = Duration::try_from_secs_f64(secs)
            .with_context(|| format!("invalid --timeout {}", secs))?;
        run_config = run_config.with_timeout(limit);
    }

    let judge = judge_for(task_dir, &config)?;
    let solution = Solution::new(task_dir, solution_name);

    eprintln!(
        "Evaluating {} on {} ({:?} judge)",
        solution_name,
        input.display(),
        config.judge
    );

    let evaluation = match judge.evaluate(&solution, input, reference, Some(&run_config)) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            eprintln!("Error: evaluation failed: {}", e);
            if e.is_checker_violation() {
                eprintln!(
                    "The checker must exit with 0 and print a score in [0.0, 1.0] on its first stdout line."
                );
            }
            std::process::exit(1);
        }
    };

    if json {
        let json_result = serde_json::json!({
            "solution": solution_name,
            "input": input,
            "score": evaluation.score,
            "verdict": evaluation.verdict,
        });
        println!("{}", serde_json::to_string_pretty(&json_result)?);
    } else {
        println!("Score: {}", evaluation.score);
        println!("Verdict: {}", evaluation.verdict);
    }
    Ok(())
}

fn generate(
    task_dir: &Path,
    generator: &str,
    subtask: Option<u32>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    offline: Option<PathBuf>,
) -> Result<()> {
    let ok = match (offline, output, subtask) {
        (Some(test_dir), _, _) => {
            OfflineGenerator::new(task_dir, generator).generate(&test_dir)?
        }
        (None, output, Some(subtask)) => {
            let timeout = TaskConfig::load_or_default(task_dir)?.run_config().timeout;
            let online = OnlineGenerator::new(task_dir, generator);
            match (output, seed) {
                (Some(output), Some(seed)) => online.generate(&output, seed, subtask, timeout)?,
                (Some(output), None) => {
                    let (seed, ok) = online.generate_random(&output, subtask, timeout)?;
                    eprintln!("Seed: {:x}", seed);
                    ok
                }
                (None, seed) => {
                    let seed = seed.unwrap_or_else(random_seed);
                    let output = default_input_path(task_dir, seed, subtask);
                    std::fs::create_dir_all(data_dir(task_dir))?;
                    eprintln!("Seed: {:x}, writing {}", seed, output.display());
                    online.generate(&output, seed, subtask, timeout)?
                }
            }
        }
        _ => anyhow::bail!("either --offline or --subtask is required"),
    };

    if !ok {
        eprintln!("Generator {} failed", generator);
        std::process::exit(1);
    }
    Ok(())
}

/// Where an online generator writes when no `--output` is given
fn default_input_path(task_dir: &Path, seed: u64, subtask: u32) -> PathBuf {
    data_dir(task_dir).join(input_name(seed, subtask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hex_seed() {
        assert_eq!(parse_hex_seed("ff"), Ok(255));
        assert_eq!(parse_hex_seed("0x1A"), Ok(26));
        assert!(parse_hex_seed("zz").is_err());
    }

    #[test]
    fn test_evaluate_arguments() {
        let cli = Cli::try_parse_from([
            "scorebox",
            "--task-dir",
            "/tasks/sum",
            "evaluate",
            "solve",
            "--input",
            "1.in",
            "--timeout",
            "2.5",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.task_dir, PathBuf::from("/tasks/sum"));
        match cli.command {
            Commands::Evaluate {
                solution,
                reference,
                timeout,
                json,
                ..
            } => {
                assert_eq!(solution, "solve");
                assert_eq!(reference, None);
                assert_eq!(timeout, Some(2.5));
                assert!(json);
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_run_keeps_hyphenated_arguments() {
        let cli = Cli::try_parse_from(["scorebox", "run", "gen", "1", "-x"]).unwrap();
        match cli.command {
            Commands::Run { program, args } => {
                assert_eq!(program, "gen");
                assert_eq!(args, vec!["1".to_string(), "-x".to_string()]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_generate_modes_are_exclusive() {
        assert!(Cli::try_parse_from([
            "scorebox", "generate", "gen", "--subtask", "1", "--output", "a.in"
        ])
        .is_ok());
        assert!(Cli::try_parse_from(["scorebox", "generate", "gen", "--offline", "tests"]).is_ok());
        assert!(Cli::try_parse_from(["scorebox", "generate", "gen", "--subtask", "2"]).is_ok());
        assert!(Cli::try_parse_from([
            "scorebox", "generate", "gen", "--offline", "tests", "--subtask", "1"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["scorebox", "generate", "gen"]).is_err());
    }

    #[test]
    fn test_default_input_path() {
        assert_eq!(
            default_input_path(Path::new("/tasks/sum"), 255, 2),
            PathBuf::from("/tasks/sum/data/255_2.in")
        );
    }

    #[test]
    fn test_generate_without_output_writes_into_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gen.sh"), "echo \"$1 $2\"\n").unwrap();

        generate(dir.path(), "gen", Some(3), Some(0x1f), None, None).unwrap();

        let written = dir.path().join("data").join("31_3.in");
        assert_eq!(std::fs::read_to_string(written).unwrap(), "3 1f\n");
    }
}
