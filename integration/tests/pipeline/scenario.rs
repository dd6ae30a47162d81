use integration::harness_error::HarnessError;
use integration::init_logging;
use integration::scenario::{PassThroughScenario, ScenarioConfig, ScenarioState};
use std::time::Duration;

fn lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[tokio::test]
async fn lines_should_pass_through_unchanged_and_in_order() {
    init_logging();
    let expected = lines(&[
        "hello world",
        "the world is not enough",
        "the world of the stock market is coming to an end",
    ]);
    let scenario = PassThroughScenario::new(
        ScenarioConfig::builder()
            .input_topic("inputTopic")
            .output_topic("outputTopic")
            .lines(expected.clone())
            .poll_interval(Duration::from_millis(100))
            .max_total_wait(Duration::from_millis(2000))
            .build(),
    );

    let report = scenario.run().await;

    assert!(report.is_success(), "scenario has failed: {:?}", report.error);
    assert!(report.warnings.is_empty());
    assert_eq!(
        report.reached,
        vec![
            ScenarioState::Init,
            ScenarioState::ClusterUp,
            ScenarioState::JobRunning,
            ScenarioState::Produced,
            ScenarioState::JobStopped,
            ScenarioState::Verified,
            ScenarioState::TornDown,
        ]
    );
    assert_eq!(report.into_result().unwrap(), expected);
}

#[tokio::test]
async fn empty_input_should_deliver_nothing() {
    init_logging();
    let scenario = PassThroughScenario::new(ScenarioConfig::builder().build());

    let report = scenario.run().await;

    assert!(report.is_success(), "scenario has failed: {:?}", report.error);
    assert!(report.into_result().unwrap().is_empty());
}

#[tokio::test]
async fn failing_scenario_should_still_be_torn_down() {
    init_logging();
    let scenario = PassThroughScenario::new(
        ScenarioConfig::builder()
            .input_topic("input topic")
            .lines(lines(&["hello world"]))
            .build(),
    );

    let report = scenario.run().await;

    assert!(!report.is_success());
    assert!(report.has_reached(ScenarioState::ClusterUp));
    assert!(!report.has_reached(ScenarioState::JobRunning));
    assert_eq!(report.state(), ScenarioState::TornDown);
    assert!(matches!(
        report.error,
        Some(HarnessError::TopicCreationError { .. })
    ));
}

#[tokio::test]
async fn many_lines_should_pass_through_in_order() {
    init_logging();
    let expected = (0..500)
        .map(|i| format!("line number {i}"))
        .collect::<Vec<_>>();
    let scenario = PassThroughScenario::new(
        ScenarioConfig::builder()
            .lines(expected.clone())
            .build(),
    );

    let report = scenario.run().await;

    assert_eq!(report.into_result().unwrap(), expected);
}

#[tokio::test]
async fn job_shutdown_timeout_should_only_be_a_warning() {
    init_logging();
    let expected = lines(&["hello world", "the world is not enough"]);
    let scenario = PassThroughScenario::new(
        ScenarioConfig::builder()
            .lines(expected.clone())
            .shutdown_timeout(Duration::ZERO)
            .build(),
    );

    let report = scenario.run().await;

    assert!(report.is_success(), "scenario has failed: {:?}", report.error);
    assert!(report.has_reached(ScenarioState::JobStopped));
    assert!(report.has_reached(ScenarioState::Verified));
    assert!(matches!(
        report.warnings.as_slice(),
        [HarnessError::ShutdownTimeoutError(_)]
    ));
    assert_eq!(report.into_result().unwrap(), expected);
}
