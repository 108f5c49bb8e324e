//! Structural checks on the scheduled data-generation workflow.

const WORKFLOW: &str = include_str!("../.github/workflows/generate-data.yml");

fn position(needle: &str) -> usize {
    WORKFLOW
        .find(needle)
        .unwrap_or_else(|| panic!("workflow is missing `{}`", needle))
}

#[test]
fn test_triggers_on_main_push_and_daily_noon() {
    let push = position("push:");
    let main = position("- main");
    assert!(push < main);
    assert!(WORKFLOW.contains("cron: \"0 12 * * *\""));
}

#[test]
fn test_steps_run_in_order() {
    let steps = [
        "actions/checkout@",
        "rust-toolchain@",
        "cargo build --release",
        "target/release/drill-sim",
        "actions/upload-artifact@",
    ];
    let positions: Vec<usize> = steps.iter().map(|s| position(s)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
}

#[test]
fn test_uploads_generated_csv_files() {
    let upload = position("actions/upload-artifact@");
    assert!(position("path: data/*.csv") > upload);
    assert!(position("name: drilling-data") > upload);
    assert!(position("--output-dir data") < upload);
}
