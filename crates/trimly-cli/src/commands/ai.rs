//! AI backend command implementations

use std::time::Instant;

use anyhow::Result;
use trimly_core::ai::parsing::parse_craving_prediction;
use trimly_core::{AIBackend, AIClient, BackendKind, Config};

const SAMPLE_PROMPT: &str = "Meals so far today: 08:00 breakfast: toast (250 cal). \
The current time is Tuesday 15:00. Respond with JSON only, in exactly this shape: \
{\"riskLevel\": \"low\" | \"medium\" | \"high\", \"timeUntilCraving\": <hours>, \
\"reason\": \"<one sentence>\", \"prevention\": [\"<tip>\"], \"confidence\": <integer 0-100>}";

/// Check the configured backend and send one sample prediction prompt
pub async fn cmd_ai_test(config: &Config) -> Result<()> {
    println!("🔍 Testing AI backend...\n");

    let settings = &config.ai;
    println!("  Backend: {}", settings.backend);
    println!("  Model: {}", settings.model);
    println!("  Timeout: {}s", settings.timeout.as_secs());
    match &settings.host {
        Some(host) => println!("  Host: {}", host),
        None if settings.backend != BackendKind::Mock => {
            println!("  ⚠️  No host configured");
            println!();
            println!("Set one of:");
            println!("  export OLLAMA_HOST=http://localhost:11434");
            println!("  export AI_BACKEND=openai_compatible OPENAI_COMPATIBLE_HOST=http://localhost:8080");
            println!("or add `host = \"...\"` under [ai] in trimly.toml");
            return Ok(());
        }
        None => {}
    }
    println!();

    let Some(client) = AIClient::from_settings(settings) else {
        println!("❌ Could not create a client for this backend");
        return Ok(());
    };

    print!("Checking availability... ");
    if client.health_check().await {
        println!("✅ Connected");
    } else {
        println!("❌ Failed");
        println!("\n⚠️  Could not reach {} at {}", client.kind(), client.host());
        if client.kind() == BackendKind::Ollama {
            println!("\nTo set up Ollama:");
            println!("  1. Install Ollama: https://ollama.ai/download");
            println!("  2. Start the server: ollama serve");
            println!("  3. Pull the model: ollama pull {}", client.model());
        }
        return Ok(());
    }

    println!("\n🧪 Sending a sample craving prompt...\n");
    let started = Instant::now();
    let result = tokio::time::timeout(settings.timeout, client.generate(None, SAMPLE_PROMPT)).await;
    let elapsed = started.elapsed();

    match result {
        Err(_) => println!(
            "  ❌ Timed out after {}s (raise [ai] timeout_secs if the model is slow)",
            settings.timeout.as_secs()
        ),
        Ok(Err(e)) => println!("  ❌ Error: {}", e),
        Ok(Ok(response)) => match parse_craving_prediction(&response) {
            Ok(prediction) => println!(
                "  ✅ {} risk in {:.1} h ({}% confidence) in {:.1}s",
                prediction.risk_level,
                prediction.time_until_craving,
                prediction.confidence,
                elapsed.as_secs_f64()
            ),
            Err(e) => {
                println!("  ⚠️  Response could not be decoded: {}", e);
                println!("  Raw response: {}", super::truncate(response.trim(), 200));
            }
        },
    }

    Ok(())
}
