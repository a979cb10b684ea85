use qpole_cli::{train, TrainerConfig, TrainingOutcome, TrainingReport};
use qpole_core::PolicyMode;

fn trial_lengths(report: &TrainingReport) -> Vec<usize> {
    report.trials.iter().map(|t| t.steps).collect()
}

fn config(policy: PolicyMode, max_trials: usize) -> TrainerConfig {
    let mut config = TrainerConfig {
        max_steps: 2_000,
        max_trials,
        report_interval: 50,
        ..Default::default()
    };
    config.agent.base.policy = policy;
    config.agent.base.seed = Some(11);
    config
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = train(&config(PolicyMode::Mixed, 100)).unwrap();
    let second = train(&config(PolicyMode::Mixed, 100)).unwrap();

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(trial_lengths(&first), trial_lengths(&second));
    assert_eq!(first.metrics, second.metrics);
}

#[test]
fn outcome_agrees_with_trial_log() {
    for policy in [PolicyMode::Greedy, PolicyMode::Mixed] {
        let report = train(&config(policy, 100)).unwrap();
        let lengths = trial_lengths(&report);

        match report.outcome {
            TrainingOutcome::Balanced { trial, steps } => {
                assert_eq!(steps, 1_999);
                assert_eq!(trial, lengths.len());
                assert!(report.trials[..trial - 1].iter().all(|t| t.failed));
            }
            TrainingOutcome::NotBalanced {
                failures,
                best_steps,
                best_trial,
            } => {
                assert_eq!(failures, 100);
                assert_eq!(lengths.len(), 100);
                assert_eq!(best_steps, *lengths.iter().max().unwrap());
                assert_eq!(lengths[best_trial - 1], best_steps);
            }
        }
    }
}

#[test]
fn learned_table_persists_across_trials() {
    let report = train(&config(PolicyMode::Greedy, 30)).unwrap();
    let updates: usize = report.trials.iter().map(|t| t.steps).sum();

    assert_eq!(report.metrics.total_steps, updates);
    assert!(report.metrics.visited_states > 1);
    assert!(report.trials.len() > 1);
}

#[tokio::test]
async fn config_file_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qpole.toml");
    tokio::fs::write(
        &path,
        r#"
max_steps = 300
max_trials = 5

[env]
track_length = 2.4

[agent]
policy = "greedy"
track_length = 4.8
seed = 3
"#,
    )
    .await
    .unwrap();

    let config = TrainerConfig::load(&path).await.unwrap();
    config.validate().unwrap();
    assert_eq!(config.env.track_length, 2.4);
    assert_eq!(config.agent.base.track_length, 4.8);

    let report = tokio::task::spawn_blocking(move || train(&config))
        .await
        .unwrap()
        .unwrap();
    assert!(!report.trials.is_empty());
}

#[tokio::test]
async fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TrainerConfig::load(&dir.path().join("absent.toml"))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}
