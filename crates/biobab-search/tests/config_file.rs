// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use biobab_core::math::{bounds::ObjectiveBounds, point::Objective};
use biobab_search::config::{Algorithm, ConfigError, ExplorationStrategy, LexminMethod, SearchConfig};
use std::path::PathBuf;

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("biobab-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_full_configuration_from_file() {
    let path = write_config(
        "full",
        r#"
            algorithm = "balanced_box"
            strategy = "depth_first"
            balanced_box_beta = 0.3
            epsilon_first_objective = "second"
            bound_right = 40.0
            log_interval = 10

            [lexmin_method]
            method = "weighted_sum"
            epsilon = 0.001
        "#,
    );
    let config = SearchConfig::from_toml_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.algorithm, Algorithm::BalancedBox);
    assert_eq!(config.strategy, ExplorationStrategy::DepthFirst);
    assert_eq!(config.balanced_box_beta, 0.3);
    assert_eq!(config.epsilon_first_objective, Objective::Second);
    assert_eq!(config.lexmin_method, LexminMethod::WeightedSum { epsilon: 0.001 });
    assert_eq!(config.log_interval, 10);
    assert_eq!(
        config.initial_bounds(ObjectiveBounds::new(100.0, 100.0)),
        ObjectiveBounds::new(40.0, 100.0),
        "the missing top bound falls back to the oracle's"
    );

    let resolved = config.resolved();
    assert!(!resolved.integer_dominance);
    assert!(!resolved.objective_space_branching);
}

#[test]
fn test_configuration_survives_serialization() {
    let config = SearchConfig::default()
        .with_algorithm(Algorithm::BidirectionalEpsilon)
        .with_strategy(ExplorationStrategy::BestFirst)
        .with_bounds(f64::INFINITY, 12.0);
    let text = toml::to_string(&config).unwrap();
    assert_eq!(SearchConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_load_errors_are_classified() {
    let missing = std::env::temp_dir().join("biobab-does-not-exist.toml");
    assert!(matches!(SearchConfig::from_toml_file(&missing), Err(ConfigError::Io(_))));

    let malformed = write_config("malformed", "algorithm = [");
    let result = SearchConfig::from_toml_file(&malformed);
    std::fs::remove_file(&malformed).ok();
    assert!(matches!(result, Err(ConfigError::Toml(_))));

    let out_of_range = write_config("invalid", "lb_max_gap = -1.0");
    let result = SearchConfig::from_toml_file(&out_of_range);
    std::fs::remove_file(&out_of_range).ok();
    match result {
        Err(ConfigError::Invalid(message)) => assert!(message.contains("lb_max_gap"), "{}", message),
        other => panic!("expected Invalid, got {:?}", other),
    }
}
