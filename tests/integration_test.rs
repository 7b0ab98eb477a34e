use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use beverage_dispenser::config::{ConfigError, DispenserConfig, ThresholdPolicy};
use beverage_dispenser::dispenser::{PreparationError, PreparationOutcome};
use beverage_dispenser::lifecycle::{ScenarioReport, ScenarioRunner};
use beverage_dispenser::model::Scenario;
use beverage_dispenser::reporting::RecordingReporter;
use beverage_dispenser::AppError;

fn runner(threshold: u32) -> (ScenarioRunner, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::new());
    let config = DispenserConfig::default().with_threshold(ThresholdPolicy::Fixed(threshold));
    let runner = ScenarioRunner::new(config, reporter.clone()).expect("valid config");
    (runner, reporter)
}

/// What each outcome must have taken out of the inventory: the whole recipe
/// when prepared, nothing for an unknown ingredient, otherwise every
/// ingredient declared before the short one.
fn expected_consumption(scenario: &Scenario, report: &ScenarioReport) -> HashMap<String, u32> {
    let mut consumed: HashMap<String, u32> = HashMap::new();
    for outcome in &report.outcomes {
        if let Some(PreparationError::IngredientNotRegistered { .. }) = outcome.error() {
            continue;
        }
        let recipe = scenario
            .recipes()
            .into_iter()
            .find(|recipe| recipe.name() == outcome.beverage())
            .expect("outcome for a requested beverage");
        let stop_at = outcome.error().and_then(|error| error.ingredient());
        for (ingredient, quantity) in recipe.ingredients() {
            if Some(ingredient.as_str()) == stop_at {
                break;
            }
            *consumed.entry(ingredient.clone()).or_default() += quantity;
        }
    }
    consumed
}

/// Hot coffee and cold coffee competing for one outlet.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_hot_and_cold_coffee_single_outlet() {
    let (runner, reporter) = runner(10);
    let scenario = Scenario::new("coffee")
        .with_outlets(1)
        .with_ingredient("hot_water", 500)
        .with_ingredient("milk", 0)
        .with_ingredient("coffee", 100)
        .with_beverage("hot_coffee", [("hot_water", 100), ("coffee", 50)])
        .with_beverage(
            "cold_coffee",
            [("hot_water", 100), ("milk", 150), ("coffee", 50)],
        );

    let report = runner.run(scenario).await.expect("scenario runs");

    assert_eq!(report.outlets, 1);
    assert_eq!(report.peak_outlets_in_use, 1);
    assert_eq!(
        report.outcome_for("hot_coffee"),
        Some(&PreparationOutcome::Prepared {
            beverage: "hot_coffee".into()
        })
    );
    assert_eq!(
        report.outcome_for("cold_coffee"),
        Some(&PreparationOutcome::Failed(
            PreparationError::InsufficientQuantity {
                beverage: "cold_coffee".into(),
                ingredient: "milk".into(),
                quantity_left: 0,
                quantity_required: 150,
            }
        ))
    );

    // Whichever ran first, cold_coffee's hot water is gone
    assert_eq!(report.stock_of("hot_water"), Some(300));
    assert_eq!(report.stock_of("coffee"), Some(50));
    assert_eq!(report.stock_of("milk"), Some(0));

    assert!(report.is_running_low("milk"));
    assert!(!report.is_running_low("coffee"));
    assert_eq!(reporter.outcomes().len(), 2);
    assert_eq!(reporter.low_running_reports().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fixture_file_conserves_stock() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/input.json");
    let scenario = Scenario::load(&path).await.expect("fixture loads");
    let (runner, reporter) = runner(100);

    let report = runner.run(scenario.clone()).await.expect("scenario runs");

    assert_eq!(report.outlets, 3);
    assert!(report.peak_outlets_in_use <= 3);
    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(reporter.scenarios(), vec![path.display().to_string()]);

    // green_tea can never be prepared: green_mixture is not stocked
    let green_tea = report.outcome_for("green_tea").expect("green_tea attempted");
    assert_eq!(
        green_tea,
        &PreparationOutcome::Failed(PreparationError::IngredientNotRegistered {
            beverage: "green_tea".into(),
            ingredient: "green_mixture".into(),
        })
    );

    // Every unit that left the inventory is accounted for by some outcome
    let consumed = expected_consumption(&scenario, &report);
    for (ingredient, initial) in scenario.ingredient_totals() {
        let used = consumed.get(ingredient).copied().unwrap_or(0);
        assert_eq!(
            report.stock_of(ingredient),
            Some(initial - used),
            "stock of {} does not add up",
            ingredient
        );
    }

    // Low stock is exactly the set below the fixed threshold
    for (ingredient, left) in &report.stock_levels {
        assert_eq!(report.is_running_low(ingredient), *left < 100, "{}", ingredient);
    }
}

#[tokio::test]
async fn test_default_outlets_when_missing() {
    let raw = r#"{
        "machine": {
            "total_items_quantity": { "hot_water": 1000 },
            "beverages": { "water": { "hot_water": 10 } }
        }
    }"#;
    let scenario = Scenario::from_json("no-outlets", raw).unwrap();
    let (runner, _) = runner(10);

    let report = runner.run(scenario).await.unwrap();

    assert_eq!(report.outlets, 3);
    assert_eq!(report.prepared().collect::<Vec<_>>(), vec!["water"]);
    assert!(report.low_running.is_empty());
}

#[tokio::test]
async fn test_zero_outlets_is_rejected() {
    let (runner, reporter) = runner(10);
    let scenario = Scenario::new("broken")
        .with_outlets(0)
        .with_ingredient("hot_water", 100)
        .with_beverage("water", [("hot_water", 10)]);

    assert!(runner.run(scenario).await.is_err());
    assert!(reporter.outcomes().is_empty());
}

#[tokio::test]
async fn test_outlet_count_beyond_semaphore_limit_is_rejected() {
    let raw = r#"{
        "machine": {
            "outlets": { "count_n": 18446744073709551615 },
            "total_items_quantity": { "hot_water": 100 },
            "beverages": { "water": { "hot_water": 10 } }
        }
    }"#;
    let scenario = Scenario::from_json("huge", raw).unwrap();
    let (runner, reporter) = runner(10);

    let err = runner.run(scenario).await.unwrap_err();

    assert!(matches!(err, ConfigError::TooManyOutlets { .. }));
    assert!(reporter.scenarios().is_empty());
    assert!(reporter.outcomes().is_empty());
}

#[tokio::test]
async fn test_scenarios_run_sequentially_with_fresh_inventory() {
    let (runner, reporter) = runner(10);
    let make = |name: &str| {
        Scenario::new(name)
            .with_outlets(2)
            .with_ingredient("hot_water", 100)
            .with_beverage("water", [("hot_water", 100)])
    };

    let reports = runner
        .run_all(vec![make("first"), make("second")])
        .await
        .unwrap();

    // The second scenario starts from a full tank again
    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert_eq!(report.prepared().count(), 1);
        assert_eq!(report.stock_of("hot_water"), Some(0));
        assert!(report.is_running_low("hot_water"));
    }
    assert_eq!(reporter.scenarios(), vec!["first".to_string(), "second".to_string()]);
    assert_eq!(reporter.low_running_reports().len(), 2);
}

#[tokio::test]
async fn test_zero_successes_is_not_an_error() {
    let (runner, _) = runner(10);
    let scenario = Scenario::new("empty-machine")
        .with_beverage("latte", [("espresso", 30), ("milk", 200)])
        .with_beverage("tea", [("tea_leaves", 5)]);

    let report = runner.run(scenario).await.unwrap();

    assert_eq!(report.prepared().count(), 0);
    assert_eq!(report.failed().count(), 2);
    assert!(report.stock_levels.is_empty());
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let result = Scenario::load(Path::new("does/not/exist.json")).await;
    assert!(matches!(result, Err(AppError::Io { .. })));
}
