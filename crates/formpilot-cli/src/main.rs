//! FormPilot — detect and fill form fields on page fixtures.

use std::sync::Arc;

use formpilot_core::EngineConfig;
use formpilot_dom::Page;
use formpilot_protocol::{EncryptedTemplate, Request, Template};
use formpilot_runtime::{channel, serve, PlainDecryptor};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("FormPilot — form field detection and autofill");
    println!();
    println!("Usage: formpilot <command> [args]");
    println!();
    println!("Commands:");
    println!("  detect <page.json>                  Detect fillable fields on a page fixture");
    println!("  fill <page.json> <template.json>    Fill the fixture with a template");
    println!("  survey <page.json>                  Count forms and controls on a fixture");
}

fn load_page(path: &str) -> anyhow::Result<Page> {
    let json = std::fs::read_to_string(path)?;
    Ok(Page::from_fixture_json(&json)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "detect" => {
            if args.len() < 3 {
                eprintln!("Usage: formpilot detect <page.json>");
                std::process::exit(1);
            }
            let page = load_page(&args[2])?;
            let response = run_one(page, Request::DetectFields).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "fill" => {
            if args.len() < 4 {
                eprintln!("Usage: formpilot fill <page.json> <template.json>");
                std::process::exit(1);
            }
            let page = load_page(&args[2])?;
            let template: Template =
                serde_json::from_str(&std::fs::read_to_string(&args[3])?)?;
            info!(template = %template.name, "template loaded");
            let request = Request::FillForm {
                template: EncryptedTemplate::plaintext(&template),
            };
            let response = run_one(page, request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "survey" => {
            if args.len() < 3 {
                eprintln!("Usage: formpilot survey <page.json>");
                std::process::exit(1);
            }
            let page = load_page(&args[2])?;
            println!("{}", serde_json::to_string_pretty(&page.survey())?);
        }
        "--help" | "-h" | "help" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Spin up a page session, answer one request, and shut it down.
async fn run_one(
    page: Page,
    request: Request,
) -> anyhow::Result<formpilot_protocol::Response> {
    let (sender, rx) = channel(1);
    let server = tokio::spawn(serve(
        page,
        Arc::new(PlainDecryptor),
        EngineConfig::from_env(),
        rx,
    ));
    let response = sender.send(request).await?;
    drop(sender);
    server.await?;
    Ok(response)
}
