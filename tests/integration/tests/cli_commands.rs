//! CLI routing integration tests.
//!
//! These verify that argument vectors reach the right command and that the
//! commands which need no upstream service complete.

use clap::Parser;
use fitflow_cli::{run, Cli, Commands};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[tokio::test]
async fn test_version_runs() {
    let cli = parse(&["fitflow", "version"]).unwrap();
    assert!(run(cli).await.is_ok());
}

#[test]
fn test_serve_with_memory_store() {
    let cli = parse(&["fitflow", "serve", "--memory-store", "-p", "8123"]).unwrap();
    match cli.command {
        Commands::Serve(args) => {
            assert!(args.memory_store);
            assert_eq!(args.port, Some(8123));
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_macro_plan_arguments() {
    let cli = parse(&[
        "fitflow",
        "macro-plan",
        "--goal",
        "lose fat",
        "--profile",
        "Age 41, Weight 92 kg",
    ])
    .unwrap();
    match cli.command {
        Commands::MacroPlan(args) => {
            assert_eq!(args.goal, "lose fat");
            assert_eq!(args.profile, "Age 41, Weight 92 kg");
        }
        _ => panic!("Expected MacroPlan command"),
    }
}

#[test]
fn test_unknown_command_rejected() {
    assert!(parse(&["fitflow", "gateway", "run"]).is_err());
}

#[test]
fn test_env_file_flag() {
    let cli = parse(&["fitflow", "--env-file", "/tmp/fitflow.env", "version"]).unwrap();
    assert_eq!(cli.env_file, std::path::PathBuf::from("/tmp/fitflow.env"));
}
