use clap::Parser;
use hitlens_cli::{BackendArgs, Cli, Commands};
use tempfile::TempDir;

#[test]
fn snapshot_flags_parse() {
    let cli = Cli::try_parse_from([
        "hitlens",
        "snapshot",
        "--native",
        "native.json",
        "--polls",
        "3",
        "--table",
    ])
    .unwrap();

    match cli.command {
        Commands::Snapshot {
            backends,
            polls,
            interval_ms,
            table,
        } => {
            assert_eq!(backends.native.as_deref(), Some(std::path::Path::new("native.json")));
            assert!(backends.browser.is_none());
            assert_eq!(polls, 3);
            assert_eq!(interval_ms, 500);
            assert!(table);
        }
        _ => panic!("expected snapshot command"),
    }
}

#[test]
fn matches_requires_both_paths() {
    assert!(Cli::try_parse_from(["hitlens", "matches", "app.js"]).is_err());
}

#[tokio::test]
async fn backend_args_build_from_config_and_fixtures() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let native = dir.path().join("native.json");
    std::fs::write(&config, r#"{ "refresh_strategy": "concurrent" }"#).unwrap();
    std::fs::write(&native, r#"{ "hits": { "native:f": 2 } }"#).unwrap();

    let args = BackendArgs {
        native: Some(native),
        browser: None,
        config: Some(config),
    };
    let aggregator = args.build().unwrap();
    aggregator.init();

    assert!(aggregator.is_ready());
    let merged = aggregator.refresh_hit_counts().await.unwrap();
    assert_eq!(merged.hits_for(&"native:f".into()), Some(2));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{ "merge_priority": [] }"#).unwrap();

    let args = BackendArgs {
        config: Some(config),
        ..BackendArgs::default()
    };
    assert!(args.build().is_err());
}
