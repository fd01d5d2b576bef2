//! nginx-sites - Manage nginx site configurations and the nginx service.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nginx_sites::commands::{CommandParams, CommandRegistry, CommandResult, ExecutionContext};
use nginx_sites::config::{Settings, DEFAULT_CONFIG_PATH};
use nginx_sites::executor::SystemRunner;
use nginx_sites::sites::SiteManager;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

/// Flags routed into the per-call `options` override.
const OPTION_KEYS: &[&str] = &[
    "conf",
    "config_file",
    "dir",
    "enabled",
    "error",
    "global",
    "init",
    "logs",
    "prefix",
    "quiet",
    "signal",
    "sudo",
    "test",
    "test_full",
    "version_full",
];

/// Flags taking a comma-separated list.
const LIST_KEYS: &[&str] = &["domains", "subdomains"];

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", NAME, VERSION);
        return ExitCode::SUCCESS;
    }

    let request = match parse_args(&args) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Run '{} --help' for usage.", NAME);
            return ExitCode::from(2);
        }
    };

    let settings = match Settings::load_or_default(request.config_path.as_deref().map(Path::new)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&settings) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        version = VERSION,
        config = request.config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH),
        command = %request.command,
        "Starting {}",
        NAME
    );

    let result = run(&settings, request);

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Build the manager from settings and dispatch one command.
fn run(settings: &Settings, request: CliRequest) -> CommandResult {
    let runner = SystemRunner::new()
        .elevate_with(settings.privilege.elevate_with.clone())
        .timeout(settings.limits.command_timeout());
    let manager = SiteManager::system(runner).with_options(settings.nginx.clone());

    info!(service_manager = ?manager.service_manager(), "Site manager ready");

    let registry = CommandRegistry::new(Arc::new(manager));
    let ctx = ExecutionContext::for_command(&request.command);

    match registry.dispatch(&ctx, &request.command, CommandParams::new(request.params)) {
        Ok(result) => result,
        Err(e) => {
            error!(request_id = %ctx.request_id, error = %e, "Command failed");
            CommandResult::from_error(&e)
        }
    }
}

/// A parsed command line.
#[derive(Debug)]
struct CliRequest {
    config_path: Option<String>,
    command: String,
    params: Value,
}

/// Parse `[-c|--config PATH] <command> [site_name] [--flags]`.
///
/// `--key value` and `--key=value` set a parameter, a bare `--key` sets it
/// to true and `--no-key` to false. Option-record keys are collected under
/// `options`; `--options <json>` supplies the whole override at once.
fn parse_args(args: &[String]) -> Result<CliRequest, String> {
    let mut config_path = None;
    let mut positionals = Vec::new();
    let mut params = Map::new();
    let mut options = Map::new();

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        i += 1;

        if arg == "-c" || arg == "--config" {
            let path = args.get(i).ok_or("--config requires a path")?;
            config_path = Some(path.clone());
            i += 1;
            continue;
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            config_path = Some(path.to_string());
            continue;
        }

        let Some(flag) = arg.strip_prefix("--") else {
            positionals.push(arg.clone());
            continue;
        };

        let (key, value) = match flag.split_once('=') {
            Some((key, value)) => (normalize_key(key), Some(value.to_string())),
            None => {
                let key = normalize_key(flag);
                match args.get(i) {
                    Some(next) if !next.starts_with("--") && !is_bool_key(&key) => {
                        i += 1;
                        (key, Some(next.clone()))
                    }
                    _ => (key, None),
                }
            }
        };

        let (key, value) = match (key.strip_prefix("no_"), value) {
            (Some(negated), None) => (negated.to_string(), Value::Bool(false)),
            (_, None) => (key, Value::Bool(true)),
            (_, Some(raw)) => {
                let value = param_value(&key, &raw)?;
                (key, value)
            }
        };

        if key == "options" {
            match value {
                Value::Object(map) => {
                    for (k, v) in map {
                        options.entry(k).or_insert(v);
                    }
                }
                _ => return Err("--options expects a JSON object".to_string()),
            }
        } else if OPTION_KEYS.contains(&key.as_str()) {
            // `--config` is taken by the settings file
            let key = if key == "config_file" { "config".to_string() } else { key };
            options.insert(key, value);
        } else {
            params.insert(key, value);
        }
    }

    let mut positionals = positionals.into_iter();
    let command = positionals.next().ok_or("missing command")?;
    if let Some(site_name) = positionals.next() {
        params
            .entry("site_name")
            .or_insert(Value::String(site_name));
    }
    if let Some(extra) = positionals.next() {
        return Err(format!("unexpected argument '{}'", extra));
    }

    if !options.is_empty() {
        params.insert("options".to_string(), Value::Object(options));
    }

    Ok(CliRequest {
        config_path,
        command,
        params: Value::Object(params),
    })
}

fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
}

/// Keys that never take a separate value argument.
fn is_bool_key(key: &str) -> bool {
    matches!(
        key,
        "verbose"
            | "silent"
            | "check_symlink"
            | "comment"
            | "enabled"
            | "quiet"
            | "sudo"
            | "test"
            | "test_full"
            | "version_full"
    ) || key.starts_with("no_")
}

/// Interpret a raw flag value for `key`.
fn param_value(key: &str, raw: &str) -> Result<Value, String> {
    if key == "options" {
        return serde_json::from_str(raw).map_err(|e| format!("invalid --options JSON: {}", e));
    }
    if LIST_KEYS.contains(&key) {
        return Ok(Value::Array(
            raw.split(',')
                .map(|s| Value::String(s.trim().to_string()))
                .collect(),
        ));
    }
    if key == "indent" {
        if let Ok(count) = raw.parse::<u64>() {
            return Ok(Value::from(count));
        }
    }
    if is_bool_key(key) {
        match raw {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }
    }
    Ok(Value::String(raw.to_string()))
}

/// Print help message.
fn print_help() {
    println!(
        r#"{} {}
Manage nginx site configurations and the nginx service.

USAGE:
    {} [OPTIONS] <COMMAND> [SITE_NAME] [--FLAGS]

COMMANDS:
    site.create          Write a site configuration and enable it
                         (--content, --content-file, or the conf option)
    site.delete          Remove a site configuration and its symlink
    site.exists          Check a site configuration (--check-symlink)
    nginx.test_config    Run nginx -t
    nginx.reload         Reload nginx through the service manager
    nginx.restart        Restart nginx
    nginx.start          Start nginx
    nginx.stop           Stop nginx
    redirect.generate    Print redirect blocks (--domains, --subdomains,
                         --direction, --indent, --no-comment)

FLAGS:
    --verbose, --silent  Report each step / suppress process output
    --dir <PATH>         Base nginx directory
    --no-sudo            Run service commands without elevation
    --options <JSON>     Option overrides as a JSON object

OPTIONS:
    -c, --config <PATH>    Path to configuration file
                           [default: {}]
    -h, --help             Print help information
    -V, --version          Print version information
"#,
        NAME, VERSION, NAME, DEFAULT_CONFIG_PATH
    );
}

/// Initialize logging based on settings. Logs go to stderr; stdout carries
/// the result.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("nginx-sites")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_site_create() {
        let request = parse_args(&args(&[
            "-c",
            "/tmp/config.toml",
            "site.create",
            "example.com",
            "--content-file",
            "/tmp/example.conf",
            "--verbose",
            "--dir",
            "/etc/nginx",
            "--no-sudo",
        ]))
        .unwrap();

        assert_eq!(request.config_path.as_deref(), Some("/tmp/config.toml"));
        assert_eq!(request.command, "site.create");
        assert_eq!(
            request.params,
            serde_json::json!({
                "site_name": "example.com",
                "content_file": "/tmp/example.conf",
                "verbose": true,
                "options": { "dir": "/etc/nginx", "sudo": false }
            })
        );
    }

    #[test]
    fn test_parse_redirect_flags() {
        let request = parse_args(&args(&[
            "redirect.generate",
            "--domains",
            "example.com, example.org",
            "--indent=4",
            "--direction",
            "inbound",
            "--no-comment",
        ]))
        .unwrap();

        assert_eq!(
            request.params,
            serde_json::json!({
                "domains": ["example.com", "example.org"],
                "indent": 4,
                "direction": "inbound",
                "comment": false
            })
        );
    }

    #[test]
    fn test_bool_flag_does_not_consume_positional() {
        let request =
            parse_args(&args(&["site.exists", "--check-symlink", "example.com"])).unwrap();
        assert_eq!(
            request.params,
            serde_json::json!({ "site_name": "example.com", "check_symlink": true })
        );
    }

    #[test]
    fn test_options_json_and_explicit_flags() {
        let request = parse_args(&args(&[
            "nginx.test_config",
            "--signal",
            "reload",
            "--options",
            r#"{"signal": "quit", "quiet": true}"#,
            "--config-file",
            "/etc/nginx/nginx.conf",
        ]))
        .unwrap();

        assert_eq!(
            request.params,
            serde_json::json!({
                "options": {
                    "signal": "reload",
                    "quiet": true,
                    "config": "/etc/nginx/nginx.conf"
                }
            })
        );
    }

    #[test]
    fn test_only_boolean_flags_take_boolean_values() {
        let request = parse_args(&args(&[
            "site.create",
            "example.com",
            "--content",
            "true",
            "--sudo=false",
            "--comment=false",
        ]))
        .unwrap();

        assert_eq!(
            request.params,
            serde_json::json!({
                "site_name": "example.com",
                "content": "true",
                "comment": false,
                "options": { "sudo": false }
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["site.create", "a", "b"])).is_err());
        assert!(parse_args(&args(&["nginx.reload", "--options", "[1]"])).is_err());
    }
}
