use std::sync::Arc;

use beverage_dispenser::config::{DispenserConfig, ThresholdPolicy};
use beverage_dispenser::dispenser::{Dispenser, PreparationError};
use beverage_dispenser::inventory::Inventory;
use beverage_dispenser::lifecycle::ScenarioRunner;
use beverage_dispenser::model::{BeverageRecipe, Scenario};
use beverage_dispenser::reporting::RecordingReporter;

/// Many identical beverages contending for one ingredient through the runner.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_contested_ingredient_admits_exactly_what_fits() {
    let reporter = Arc::new(RecordingReporter::new());
    let config = DispenserConfig::default().with_threshold(ThresholdPolicy::Fixed(50));
    let runner = ScenarioRunner::new(config, reporter.clone()).unwrap();

    let mut scenario = Scenario::new("rush-hour")
        .with_outlets(4)
        .with_ingredient("espresso", 1_000);
    for _ in 0..100 {
        scenario = scenario.with_beverage("espresso_shot", [("espresso", 30)]);
    }

    let report = runner.run(scenario).await.unwrap();

    // floor(1000 / 30) shots fit, never more
    assert_eq!(report.prepared().count(), 33);
    assert_eq!(report.failed().count(), 67);
    assert_eq!(report.stock_of("espresso"), Some(10));
    assert!(report.peak_outlets_in_use <= 4);
    assert!(report.is_running_low("espresso"));

    for failed in report.failed() {
        match failed.error() {
            Some(PreparationError::InsufficientQuantity {
                quantity_left,
                quantity_required,
                ..
            }) => {
                assert_eq!(*quantity_required, 30);
                assert!(*quantity_left < 30);
            }
            other => panic!("unexpected failure {:?}", other),
        }
    }
    assert_eq!(reporter.prepared_count(), 33);
}

/// Outlet bound holds when the dispenser is driven directly by many tasks.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_outlet_bound_with_direct_dispenser() {
    let inventory = Inventory::new();
    inventory.add_with_threshold("hot_water", 100_000, 10);
    let dispenser = Arc::new(Dispenser::new(inventory, 2));

    let mut handles = vec![];
    for i in 0..200 {
        let dispenser = dispenser.clone();
        handles.push(tokio::spawn(async move {
            let recipe = BeverageRecipe::new(format!("water_{}", i), [("hot_water", 10)]);
            dispenser.prepare(&recipe).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_prepared());
    }

    assert!(dispenser.outlets().peak() <= 2);
    assert_eq!(dispenser.outlets().in_use(), 0);
    assert_eq!(
        dispenser.inventory().get("hot_water").unwrap().quantity(),
        100_000 - 200 * 10
    );
}

/// Two-ingredient recipes racing: stock never goes negative and every unit
/// taken out is explained by a prepared beverage or a partial consumption.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_partial_consumption_under_contention() {
    let inventory = Inventory::new();
    inventory.add_with_threshold("hot_water", 10_000, 10);
    inventory.add_with_threshold("milk", 250, 10);
    let dispenser = Arc::new(Dispenser::new(inventory, 3));

    let mut handles = vec![];
    for _ in 0..20 {
        let dispenser = dispenser.clone();
        handles.push(tokio::spawn(async move {
            let recipe = BeverageRecipe::new("latte", [("hot_water", 100), ("milk", 50)]);
            dispenser.prepare(&recipe).await
        }));
    }

    let mut prepared = 0;
    let mut short_on_milk = 0;
    for handle in handles {
        let outcome = handle.await.unwrap();
        if outcome.is_prepared() {
            prepared += 1;
        } else {
            assert_eq!(outcome.error().and_then(|e| e.ingredient()), Some("milk"));
            short_on_milk += 1;
        }
    }

    assert_eq!(prepared, 5);
    assert_eq!(short_on_milk, 15);

    let inventory = dispenser.inventory();
    assert_eq!(inventory.get("milk").unwrap().quantity(), 0);
    // Every latte took its hot water, prepared or not
    assert_eq!(inventory.get("hot_water").unwrap().quantity(), 10_000 - 20 * 100);
}
