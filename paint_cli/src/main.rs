//! # Paint CLI
//!
//! Terminal front end for the painting surface-area engine. Results are
//! printed to stdout as JSON; logs go to stderr (`RUST_LOG` controls the level).
//!
//! ```text
//! paint_cli [--config paint.toml] calc <TAG> key=value ...
//! paint_cli [--config paint.toml] seed <materials.json>
//! paint_cli [--config paint.toml] estimate <lines.json>
//! ```

mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use paint_core::calculations::painting_line::{self, PaintingLineInput};
use paint_core::calculations::surface_area;
use paint_core::profiles::{Dimensions, Profile, ProfileType};
use paint_core::seeding::seed_catalog_from_json;
use paint_core::units::{round_to, TOTAL_AREA_DECIMALS};
use paint_core::{CalcError, EstimateSettings, PaintCatalog};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: paint_cli [--config <file>] <command> [args]

Commands:
  calc <TAG> key=value ...   Perimeter/area for one profile
                             TAG: FR UE US CH W L MET TB
                             keys: diameter height flange stiffener_lip width
                                   thickness leg1 leg2 side quantity length
                             length defaults to the configured bar length
  seed <materials.json>      Build a catalog from a JSON array of materials
  estimate <lines.json>      Paint estimate for a JSON array of painting lines
  help                       Show this message";

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let (config_path, rest) = split_config_flag(args)?;

    let Some((command, command_args)) = rest.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    match command.as_str() {
        "calc" => {
            let config = config::load_config(config_path.as_deref())?;
            run_calc(command_args, &config.estimate)
        }
        "seed" => run_seed(command_args),
        "estimate" => {
            let config = config::load_config(config_path.as_deref())?;
            run_estimate(command_args, &config.estimate)
        }
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

/// Pull `--config <path>` out of the argument list.
fn split_config_flag(args: &[String]) -> anyhow::Result<(Option<PathBuf>, Vec<String>)> {
    let mut config_path = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config requires a path")?;
            config_path = Some(PathBuf::from(path));
        } else {
            rest.push(arg.clone());
        }
    }

    Ok((config_path, rest))
}

fn run_calc(args: &[String], settings: &EstimateSettings) -> anyhow::Result<()> {
    let output = calc_output(args, settings)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn calc_output(args: &[String], settings: &EstimateSettings) -> anyhow::Result<Value> {
    let Some((tag, pairs)) = args.split_first() else {
        bail!("calc requires a profile tag\n\n{}", USAGE);
    };
    let profile_type = ProfileType::from_tag(tag)?;

    let mut dims = Dimensions::default();
    let mut quantity = None;
    let mut length_m = None;
    for pair in pairs {
        let (key, value) = parse_pair(pair)?;
        match key {
            "quantity" | "qty" => quantity = Some(value),
            "length" | "length_m" => length_m = Some(value),
            _ => {
                if !dims.set(key, value) {
                    bail!("unknown dimension '{}'", key);
                }
            }
        }
    }

    let result = surface_area::calculate(profile_type, &dims)?;
    let profile = Profile::from_dimensions(profile_type, &dims)?;

    let mut output = json!({
        "code": profile.code(),
        "description": profile.description(),
        "result": result,
    });
    if let Some(quantity) = quantity {
        let length_m = length_m.unwrap_or(settings.default_bar_length_m);
        let total = result.total_area_m2(quantity, length_m)?;
        output["length_m"] = json!(length_m);
        output["total_area_m2"] = json!(total);
    }

    Ok(output)
}

fn parse_pair(pair: &str) -> anyhow::Result<(&str, f64)> {
    let (key, value) = pair
        .split_once('=')
        .with_context(|| format!("expected key=value, got '{}'", pair))?;
    let value: f64 = value
        .trim()
        .replace(',', ".")
        .parse()
        .with_context(|| format!("'{}' is not a number", value))?;
    Ok((key.trim(), value))
}

fn run_seed(args: &[String]) -> anyhow::Result<()> {
    let path = single_path(args, "seed")?;
    let records: Vec<Value> = read_json(path)?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = seed_output(name, &records);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn seed_output(name: String, records: &[Value]) -> Value {
    let mut catalog = PaintCatalog::new(name);
    let report = seed_catalog_from_json(&mut catalog, records);
    json!({
        "catalog": catalog,
        "report": report,
    })
}

fn run_estimate(args: &[String], settings: &EstimateSettings) -> anyhow::Result<()> {
    let path = single_path(args, "estimate")?;
    let lines: Vec<Value> = read_json(path)?;
    let output = estimate_output(&lines, settings);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Each line is parsed and calculated on its own; a bad line becomes an
/// error row and the remaining lines still count toward the totals.
fn estimate_output(lines: &[Value], settings: &EstimateSettings) -> Value {
    let mut total_area = 0.0;
    let mut total_liters = 0.0;
    let mut failed = 0usize;
    let mut rows = Vec::with_capacity(lines.len());

    for (index, value) in lines.iter().enumerate() {
        let label = value
            .get("label")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index));

        let result = PaintingLineInput::from_json(value)
            .and_then(|line| painting_line::calculate(&line, settings));
        match result {
            Ok(result) => {
                total_area += result.painted_area_m2;
                total_liters += result.paint_liters;
                rows.push(json!({ "label": label, "result": result }));
            }
            Err(error) => {
                tracing::warn!(line = %label, code = error.error_code(), "skipping painting line: {}", error);
                failed += 1;
                rows.push(json!({ "label": label, "error": error }));
            }
        }
    }

    tracing::info!(lines = lines.len(), failed, "estimate finished");

    json!({
        "paint_system": settings.paint_system,
        "lines": rows,
        "failed": failed,
        "painted_area_m2": round_to(total_area, TOTAL_AREA_DECIMALS),
        "paint_liters": round_to(total_liters, TOTAL_AREA_DECIMALS),
    })
}

fn single_path<'a>(args: &'a [String], command: &str) -> anyhow::Result<&'a Path> {
    match args {
        [path] => Ok(Path::new(path)),
        _ => bail!("{} requires exactly one JSON file\n\n{}", command, USAGE),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(CalcError::from)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn report_error(error: &anyhow::Error) {
    eprintln!("Error: {:#}", error);
    if let Some(calc_error) = error.downcast_ref::<CalcError>() {
        if let Ok(json) = serde_json::to_string_pretty(calc_error) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_config_flag() {
        let (path, rest) = split_config_flag(&args(&["--config", "x.toml", "calc", "FR"])).unwrap();
        assert_eq!(path, Some(PathBuf::from("x.toml")));
        assert_eq!(rest, args(&["calc", "FR"]));

        assert!(split_config_flag(&args(&["calc", "--config"])).is_err());
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("diameter=100").unwrap(), ("diameter", 100.0));
        assert_eq!(parse_pair("leg1 = 38,1").unwrap(), ("leg1", 38.1));
        assert!(parse_pair("diameter").is_err());
        assert!(parse_pair("diameter=abc").is_err());
    }

    #[test]
    fn test_calc_errors_are_structured() {
        let settings = EstimateSettings::default();
        let err = calc_output(&args(&["XX", "diameter=10"]), &settings).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CalcError>().map(|e| e.error_code()),
            Some("UNKNOWN_PROFILE_TYPE")
        );

        let err = calc_output(&args(&["FR"]), &settings).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CalcError>().map(|e| e.error_code()),
            Some("MISSING_DIMENSION")
        );

        assert!(calc_output(&args(&["FR", "radius=10"]), &settings).is_err());
    }

    #[test]
    fn test_calc_quantity_uses_configured_length() {
        let settings = EstimateSettings::default();
        let output = calc_output(&args(&["FR", "diameter=100", "quantity=10"]), &settings).unwrap();
        assert_eq!(output["length_m"], json!(6.0));
        assert_eq!(output["total_area_m2"], json!(37.68));

        let output =
            calc_output(&args(&["FR", "diameter=100", "quantity=10", "length=1"]), &settings).unwrap();
        assert_eq!(output["total_area_m2"], json!(6.28));
    }

    #[test]
    fn test_estimate_isolates_bad_lines() {
        let lines = vec![
            json!({ "label": "Barras", "profile_type": "FR", "dimensions": { "diameter": 100 }, "quantity": 10, "length_m": 6 }),
            json!({ "label": "Perfil I", "profile_type": "IPE", "dimensions": { "height": 200 }, "quantity": 4 }),
            json!({ "label": "Tubos", "profile_type": "tb", "dimensions": { "diameter": 100 }, "quantity": 2, "length_m": 5 }),
        ];

        let output = estimate_output(&lines, &EstimateSettings::default());
        assert_eq!(output["failed"], json!(1));
        assert_eq!(output["lines"][0]["result"]["total_area_m2"], json!(37.68));
        assert_eq!(output["lines"][1]["error"]["type"], json!("UnknownProfileType"));
        assert_eq!(output["lines"][1]["error"]["details"]["value"], json!("IPE"));
        // 0.3 * 2 * 5 = 3.0
        assert_eq!(output["lines"][2]["result"]["total_area_m2"], json!(3.0));
        assert_eq!(output["painted_area_m2"], json!(40.68));
    }

    #[test]
    fn test_run_estimate_survives_bad_line() {
        let path = std::env::temp_dir().join(format!("paint_cli_estimate_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                { "profile_type": "FR", "dimensions": { "diameter": 100 }, "quantity": 10, "length_m": 6 },
                { "profile_type": "IPE", "quantity": 1 }
            ]"#,
        )
        .unwrap();

        let result = run_estimate(&[path.to_string_lossy().into_owned()], &EstimateSettings::default());
        std::fs::remove_file(&path).ok();
        assert!(result.is_ok());
    }

    #[test]
    fn test_seed_reports_bad_records() {
        let records = vec![
            json!({ "name": "Barra 20", "category": "Barra Redonda", "dimensions": { "diameter": 20 } }),
            json!({ "name": "Parafuso", "category": "Parafuso" }),
            json!({ "name": "Sem categoria", "dimensions": { "diameter": 20 } }),
        ];

        let output = seed_output("Teste".to_string(), &records);
        assert_eq!(output["catalog"]["meta"]["name"], json!("Teste"));
        assert_eq!(output["report"]["created"], json!(1));
        let failures = output["report"]["failures"].as_array().unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0]["error"]["type"], json!("UnknownCategory"));
        assert_eq!(failures[1]["error"]["type"], json!("SerializationError"));
    }

    #[test]
    fn test_single_path() {
        assert!(single_path(&args(&["a.json"]), "seed").is_ok());
        assert!(single_path(&args(&[]), "seed").is_err());
        assert!(single_path(&args(&["a.json", "b.json"]), "seed").is_err());
    }
}
