use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use dynamic_router::config::{load_routing, ObservabilityConfig};
use dynamic_router::observability::logging;
use dynamic_router::{Decision, DynamicRouter, MiniJinjaEngine, TemplateEngine};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Evaluate dynamic routing rules offline", long_about = None)]
struct Cli {
    /// Rule file (.json rule list or .toml/.json gateway config).
    #[arg(short, long)]
    rules: PathBuf,

    /// Log level for routing diagnostics.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a request path and print the decision
    Eval {
        /// Raw request path, context path included.
        path: String,

        /// Overrides the context path from the rule file.
        #[arg(short, long)]
        context_path: Option<String>,

        /// Request attribute visible to templates, as key=value.
        #[arg(short, long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,
    },
    /// List rules in evaluation order
    Rules,
}

fn parse_attribute(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", s))
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&ObservabilityConfig {
        log_level: cli.log_level.clone(),
    })?;

    let routing = load_routing(&cli.rules)?;

    match cli.command {
        Commands::Eval {
            path,
            context_path,
            attributes,
        } => {
            let context_path = context_path.unwrap_or_else(|| routing.context_path.clone());
            let router = DynamicRouter::from_config(&routing);
            let attributes: BTreeMap<String, String> = attributes.into_iter().collect();

            let (output, code) = match router.route_path(&path, &context_path, attributes) {
                Ok(Decision::Resolved(endpoint)) => (
                    json!({ "decision": "resolved", "endpoint": endpoint }),
                    ExitCode::SUCCESS,
                ),
                Ok(Decision::PassThrough) => (json!({ "decision": "pass_through" }), ExitCode::SUCCESS),
                Err(err) => (
                    json!({
                        "decision": err.kind(),
                        "status": err.status().as_u16(),
                        "error": err.to_string(),
                    }),
                    ExitCode::FAILURE,
                ),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(code)
        }
        Commands::Rules => {
            let engine = MiniJinjaEngine::new();
            let rules: Vec<_> = routing
                .rules
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(index, rule)| {
                    json!({
                        "index": index,
                        "pattern": rule.pattern,
                        "url": rule.url,
                        "dynamic_pattern": engine.has_placeholders(&rule.pattern),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "context_path": routing.context_path,
                    "rules": rules,
                }))?
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
