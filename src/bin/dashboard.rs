// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use clap::Parser;
use seopulse::application::controller::AppController;
use seopulse::config::settings::Settings;
use seopulse::dashboard::mode::ToolMode;
use seopulse::dashboard::shell::Shell;
use seopulse::domain::models::analysis::AnalysisReport;
use seopulse::infrastructure::gateway::endpoint_store::FileEndpointStore;
use seopulse::infrastructure::gateway::http_gateway::HttpGateway;
use seopulse::utils::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "dashboard")]
#[command(version)]
#[command(about = "Render one SEO dashboard frame against the configured project store")]
struct Cli {
    #[arg(
        short,
        long,
        default_value = "MONITOR",
        help = "Tool mode to render (MONITOR, AUDIT, ROADMAP, SITEMAP, PRODUCT, COLLECTION, KEYWORD, BLOG)."
    )]
    mode: ToolMode,

    #[arg(
        short,
        long,
        env = "SEOPULSE_ENDPOINT",
        help = "Test this store endpoint and save it when reachable."
    )]
    endpoint: Option<String>,

    #[arg(short, long, help = "Project id to select before rendering.")]
    project: Option<String>,

    #[arg(long, help = "JSON analysis report to publish before rendering.")]
    report: Option<PathBuf>,

    #[arg(long, help = "Render with the sidebar collapsed.")]
    collapsed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    let cli = Cli::parse();
    let settings = Settings::new()?;

    let store = Arc::new(FileEndpointStore::new(&settings.dashboard.endpoint_file));
    let gateway = Arc::new(HttpGateway::new(store, settings.dashboard.request_timeout())?);
    let controller = AppController::new(gateway, settings.dashboard.reload_delay());

    let scheduled = match &cli.endpoint {
        Some(url) => {
            let outcome = controller.reconfigure_endpoint(url).await;
            if outcome.test.success {
                info!("{}", outcome.test.message);
            } else {
                warn!("Endpoint rejected: {}", outcome.test.message);
            }
            outcome.reload
        }
        None => None,
    };
    match scheduled {
        Some(reload) => {
            reload.await.context("reload task failed")?;
        }
        None => {
            controller.initialize().await;
        }
    }

    let mut shell = Shell::new(controller);
    if let Some(id) = &cli.project {
        if !shell.controller().select_project(id) {
            warn!("Project {} not found, keeping current selection", id);
        }
    }
    if let Some(path) = &cli.report {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report {}", path.display()))?;
        let report: AnalysisReport = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse report {}", path.display()))?;
        shell.publish_report(report);
    }
    if cli.collapsed {
        shell.toggle_sidebar();
    }
    shell.switch_mode(cli.mode);

    println!("{}", shell.render());
    Ok(())
}
