use anyhow::{bail, Result};
use colored::*;
use serde_json::{json, Value};

/// Query `/health` on a running server and print the result
pub async fn execute(base_url: String, format: String) -> Result<()> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let status = fetch_health(&url).await;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        _ => {
            print_health_status_text(&status);
        }
    }

    if status["status"] == "offline" {
        bail!("Journal server is not reachable at {}", base_url);
    }

    Ok(())
}

async fn fetch_health(url: &str) -> Value {
    match reqwest::get(url).await {
        Ok(response) if response.status().is_success() => match response.json::<Value>().await {
            Ok(body) => body,
            Err(e) => json!({
                "status": "unhealthy",
                "message": format!("Unreadable health response: {}", e),
            }),
        },
        Ok(response) => json!({
            "status": "unhealthy",
            "message": format!("Server returned status: {}", response.status()),
        }),
        Err(_) => json!({
            "status": "offline",
            "message": "Server is not running or not reachable",
            "endpoint": url,
        }),
    }
}

/// Print health status in a formatted text output
fn print_health_status_text(status: &Value) {
    println!("{}", "=== Journal Health Check ===".bold());
    println!();

    let overall_status = status["status"].as_str().unwrap_or("unknown");
    let status_display = match overall_status {
        "healthy" => "HEALTHY".green().bold(),
        "degraded" => "DEGRADED".yellow().bold(),
        "unhealthy" => "UNHEALTHY".red().bold(),
        "offline" => "OFFLINE".white().bold(),
        _ => "UNKNOWN".white().bold(),
    };

    println!("Overall Status: {}", status_display);
    if let Some(version) = status["version"].as_str() {
        println!("Version: {}", version);
    }
    if let Some(timestamp) = status["timestamp"].as_str() {
        println!("Timestamp: {}", timestamp);
    }
    if let Some(message) = status["message"].as_str() {
        println!("{}", message);
    }

    let database = &status["database"];
    if let Some(connected) = database["connected"].as_bool() {
        let icon = if connected { "✓".green() } else { "✗".red() };
        println!();
        println!("{} {}", icon, "DATABASE".bold());
        if let Some(message) = database["message"].as_str() {
            println!("  {}", message);
        }
    }
}
