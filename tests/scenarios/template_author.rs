//! Scenario: Template Author Verifies a Template
//!
//! Journey: An author maintaining the AWS/EKS template checks it locally.
//!
//! Steps:
//! 1. Runs `infracheck` from inside a module directory (root discovery)
//! 2. Sees every property hold
//! 3. Runs again and gets identical results
//! 4. Pins sampling in `infracheck.toml`
//! 5. Keeps a personal layout and output style in the user config
//!
//! Success Criteria:
//! - Root is discovered without `--root`
//! - Repeated runs are identical
//! - Project config drives the sampler

use infracheck::{PropertyRunner, RunOptions};

use crate::common::*;
use crate::assert_output_contains;

/// SCENARIO: Clean template, run from a nested directory
#[test]
fn scenario_author_runs_from_module_directory() {
    let env = TestEnv::compliant();

    // Step 1: run without --root from deep inside the tree
    let cwd = env.path("modules/clusters/eks");
    let result = env.run_from(&cwd, &["--color", "never", "--no-animation"], &[]);

    // Step 2: everything holds
    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "All properties hold");
    let root = env.root().canonicalize().unwrap();
    assert_output_contains!(result, &format!("Root: {}", root.display()));
}

/// SCENARIO: Verification is a pure function of the tree
#[test]
fn scenario_repeated_runs_are_identical() {
    let env = TestEnv::builder()
        .without_file(".tflint.hcl")
        .build();

    let options = RunOptions {
        cases: 16,
        seed: Some(11),
        ..RunOptions::default()
    };
    let runner = PropertyRunner::new(env.workspace());
    let first = runner.execute(&options).unwrap();
    let second = runner.execute(&options).unwrap();

    assert_eq!(first.outcomes, second.outcomes);
    assert_eq!(first.failures(), 1, "{}", describe(&first));

    let sequential = runner
        .execute(&RunOptions {
            parallel: false,
            ..options.clone()
        })
        .unwrap();
    assert_eq!(first.outcomes, sequential.outcomes);
}

/// SCENARIO: Sampling pinned in project config, overridden on the command line
#[test]
fn scenario_project_config_pins_sampling() {
    let env = TestEnv::builder()
        .with_project_config("[harness]\ncases = 6\nseed = 1234\nparallel = false\n")
        .build();

    // Step 4: config values show up in the run header
    let result = env.run(&["check", "--category", "environments"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "Sampling: 6 cases, seed 1234");

    // CLI flags win over config
    let result = env.run(&["check", "--category", "environments", "--cases", "3"]);
    assert_output_contains!(result, "Sampling: 3 cases, seed 1234");

    // Environment overrides config
    let result = env.run_with_env(
        &["check", "--category", "environments", "--json"],
        &[("INFRACHECK_CASES", "9")],
    );
    let events = result.events();
    assert_eq!(events[0]["cases"], 9);
}

/// SCENARIO: A custom layout is honored
#[test]
fn scenario_custom_layout_in_project_config() {
    let env = TestEnv::compliant();
    for env_name in ["staging", "prod"] {
        let from = env.path(&format!("live/aws/{env_name}"));
        let to = env.path(&format!("environments/{env_name}"));
        std::fs::create_dir_all(to.parent().unwrap()).unwrap();
        std::fs::rename(&from, &to).unwrap();
    }
    env.write_file(
        "infracheck.toml",
        "[layout]\nenvironments_dir = \"environments\"\n",
    );

    let result = env.run(&["check", "--category", "backend", "--category", "isolation"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "5 passed");
}

/// SCENARIO: User config layout drives discovery; project config layers on top
#[test]
fn scenario_user_config_layout_and_project_layering() {
    let env = TestEnv::compliant();
    for env_name in ["staging", "prod"] {
        let from = env.path(&format!("live/aws/{env_name}"));
        let to = env.path(&format!("environments/{env_name}"));
        std::fs::create_dir_all(to.parent().unwrap()).unwrap();
        std::fs::rename(&from, &to).unwrap();
    }
    env.remove_dir("live");
    env.write_user_config("[layout]\nenvironments_dir = \"environments\"\n\n[output]\nunicode = false\n");

    // Discovery from a module directory needs the user layout
    let cwd = env.path("modules/clusters/eks");
    let result = env.run_from(
        &cwd,
        &["--color", "never", "--no-animation", "check", "--category", "isolation"],
        &[],
    );
    assert!(result.is_success(), "{}", result.combined_output());
    let root = env.root().canonicalize().unwrap();
    assert_output_contains!(result, &format!("Root: {}", root.display()));
    assert_output_contains!(result, "3 passed");

    // A project [harness] section layers over the user file without resetting it
    env.write_file("infracheck.toml", "[harness]\ncases = 3\nseed = 9\n");
    let result = env.run(&["check", "--category", "isolation"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "Sampling: 3 cases, seed 9");
    assert_output_contains!(result, "[OK]");
}
