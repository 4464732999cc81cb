use super::{apply_config, load_config_file, types::ConfigFile};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{OutputFormat, Strategy, TesterArgs};

fn parse_with_matches(argv: &[&str]) -> Result<(TesterArgs, clap::ArgMatches), String> {
    let matches = TesterArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args =
        TesterArgs::from_arg_matches(&matches).map_err(|err| format!("from matches: {}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("barrage.toml");
    let content = r#"
url = "http://localhost:3000/"
requests = 2500
concurrency = 48
timeout = "750ms"
duration = 30
strategy = "pool"
output_format = "json"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.url.as_deref() != Some("http://localhost:3000/") {
        return Err("Unexpected url".to_owned());
    }
    if config.requests != Some(2500) {
        return Err("Unexpected requests".to_owned());
    }
    if config.concurrency != Some(48) {
        return Err("Unexpected concurrency".to_owned());
    }
    if config.strategy != Some(Strategy::Pool) {
        return Err("Unexpected strategy".to_owned());
    }
    if config.output_format != Some(OutputFormat::Json) {
        return Err("Unexpected output_format".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("barrage.json");
    let content = r#"{
  "url": "http://localhost:3000/",
  "requests": 10,
  "interrupt_grace": "500ms",
  "progress_every": 0
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.requests != Some(10) {
        return Err("Unexpected requests".to_owned());
    }
    if config.progress_every != Some(0) {
        return Err("Unexpected progress_every".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("barrage.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;

    match load_config_file(&path) {
        Ok(_) => Err("Expected yaml config to be rejected".to_owned()),
        Err(_) => Ok(()),
    }
}

#[test]
fn unknown_field_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("barrage.toml");
    std::fs::write(&path, "rate = 10\n").map_err(|err| format!("write failed: {}", err))?;

    match load_config_file(&path) {
        Ok(_) => Err("Expected unknown field to be rejected".to_owned()),
        Err(_) => Ok(()),
    }
}

#[test]
fn config_fills_unset_arguments() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["barrage"])?;
    let config = ConfigFile {
        url: Some("http://localhost:8080/".to_owned()),
        requests: Some(42),
        concurrency: Some(7),
        timeout: Some(super::types::DurationValue::Text("3s".to_owned())),
        duration: Some(super::types::DurationValue::Seconds(0)),
        strategy: Some(Strategy::Pool),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.url.as_deref() != Some("http://localhost:8080/") {
        return Err("Unexpected url".to_owned());
    }
    if args.requests != 42 {
        return Err("Unexpected requests".to_owned());
    }
    if args.concurrency.get() != 7 {
        return Err("Unexpected concurrency".to_owned());
    }
    if args.request_timeout != Duration::from_secs(3) {
        return Err("Unexpected timeout".to_owned());
    }
    if !args.max_duration.is_zero() {
        return Err("Unexpected duration".to_owned());
    }
    if args.strategy != Strategy::Pool {
        return Err("Unexpected strategy".to_owned());
    }
    Ok(())
}

#[test]
fn cli_values_win_over_config() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["barrage", "-n", "5", "-c", "2"])?;
    let config = ConfigFile {
        requests: Some(1000),
        concurrency: Some(64),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.requests != 5 {
        return Err(format!("Expected CLI requests, got {}", args.requests));
    }
    if args.concurrency.get() != 2 {
        return Err(format!(
            "Expected CLI concurrency, got {}",
            args.concurrency.get()
        ));
    }
    Ok(())
}

#[test]
fn invalid_config_values_are_rejected() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["barrage"])?;
    let zero_concurrency = ConfigFile {
        concurrency: Some(0),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &zero_concurrency).is_ok() {
        return Err("Expected zero concurrency to fail".to_owned());
    }

    let zero_timeout = ConfigFile {
        timeout: Some(super::types::DurationValue::Seconds(0)),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &zero_timeout).is_ok() {
        return Err("Expected zero timeout to fail".to_owned());
    }
    Ok(())
}

#[test]
fn fractional_second_durations_are_accepted() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("barrage.toml");
    std::fs::write(&path, "timeout = 1.5\nduration = \"0.25\"\ninterrupt_grace = 0.0\n")
        .map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let (mut args, matches) = parse_with_matches(&["barrage"])?;
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.request_timeout != Duration::from_millis(1500) {
        return Err(format!("Unexpected timeout: {:?}", args.request_timeout));
    }
    if args.max_duration != Duration::from_millis(250) {
        return Err(format!("Unexpected duration: {:?}", args.max_duration));
    }
    if !args.interrupt_grace.is_zero() {
        return Err("Expected zero interrupt grace".to_owned());
    }

    let negative = ConfigFile {
        timeout: Some(super::types::DurationValue::FractionalSeconds(-1.5)),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &negative).is_ok() {
        return Err("Expected negative timeout to fail".to_owned());
    }
    let zero = ConfigFile {
        timeout: Some(super::types::DurationValue::FractionalSeconds(0.0)),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &zero).is_ok() {
        return Err("Expected zero timeout to fail".to_owned());
    }
    Ok(())
}
