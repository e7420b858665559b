use super::*;
use crate::testing::*;
use crate::FirstChooser;

#[test]
fn test_defaults() {
    let config = SearchConfig::from_toml_str("").unwrap();
    assert_eq!(config, SearchConfig::default());
    assert_eq!(config.strategy, Strategy::AlphaBeta);
    assert_eq!((config.depth, config.breadth), (2, 4));
    assert_eq!(config.seed, None);
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_parse_full_file() {
    let config = SearchConfig::from_toml_str(
        r#"
        strategy = "stochastic"
        depth = 4
        breadth = 16
        seed = 42
        log_level = "debug"
        "#,
    )
    .unwrap();
    assert_eq!(config.strategy, Strategy::Stochastic);
    assert_eq!(
        config.plan().unwrap(),
        SearchPlan {
            strategy: Strategy::Stochastic,
            depth: 4,
            breadth: 16,
        }
    );
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_negative_depth_is_invalid_argument() {
    let err = SearchConfig::from_toml_str("depth = -1").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidArgument(ref msg) if msg.contains("depth")));

    let config = SearchConfig {
        breadth: -3,
        ..SearchConfig::default()
    };
    let err = config.plan().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidArgument(ref msg) if msg.contains("breadth")));
}

#[test]
fn test_unknown_strategy() {
    assert!(matches!(
        SearchConfig::from_toml_str(r#"strategy = "mcts""#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        "mcts".parse::<Strategy>(),
        Err(ConfigError::UnknownStrategy(name)) if name == "mcts"
    ));
}

#[test]
fn test_strategy_names_round_trip() {
    for strategy in [
        Strategy::Minimax,
        Strategy::AlphaBeta,
        Strategy::Stochastic,
        Strategy::Random,
    ] {
        assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
    }
    assert_eq!("Alpha-Beta".parse::<Strategy>().unwrap(), Strategy::AlphaBeta);
}

#[test]
fn test_missing_file_reports_path() {
    let err = SearchConfig::load("/nonexistent/search.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/search.toml"));
}

#[test]
fn test_plan_dispatches_to_each_searcher() {
    let plan = |strategy| SearchPlan {
        strategy,
        depth: 2,
        breadth: 3,
    };

    let out = plan(Strategy::Minimax)
        .run(&textbook(), Player::Max, &TreeGame::ROOT, &(), &mut FirstChooser)
        .unwrap();
    assert_eq!((out.value, out.nodes), (3.0, 12));

    let out = plan(Strategy::AlphaBeta)
        .run(&textbook(), Player::Max, &TreeGame::ROOT, &(), &mut FirstChooser)
        .unwrap();
    assert_eq!((out.value, out.nodes), (3.0, 10));

    let out = plan(Strategy::Stochastic)
        .run(&textbook(), Player::Max, &TreeGame::ROOT, &(), &mut FirstChooser)
        .unwrap();
    assert_eq!((out.value, out.moves.clone()), (14.0, vec![9]));

    let out = plan(Strategy::Random)
        .run(&textbook(), Player::Max, &TreeGame::ROOT, &(), &mut FirstChooser)
        .unwrap();
    assert_eq!(out.moves, vec![1]);
}

#[test]
fn test_seeded_chooser_is_reproducible() {
    let config = SearchConfig {
        seed: Some(9),
        ..SearchConfig::default()
    };
    let candidates: Vec<u32> = (0..100).collect();
    let (mut a, mut b) = (config.chooser(), config.chooser());
    for _ in 0..10 {
        assert_eq!(a.choose(&candidates[..]), b.choose(&candidates[..]));
    }
}
