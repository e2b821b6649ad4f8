//! Reads a quote request as JSON on stdin and writes the quote to stdout.

use anyhow::Context;
use psq_config::Settings;
use psq_quote_service::QuoteService;
use std::io::{self, Read};

fn main() -> anyhow::Result<()> {
    let settings = Settings::new()?;
    psq_telemetry::init_subscriber("psq-quote-service", &settings.log.level)?;

    let mut body = String::new();
    io::stdin()
        .read_to_string(&mut body)
        .context("failed to read quote request from stdin")?;

    let quote = QuoteService::new(settings.engine).quote_json(&body)?;
    let output = serde_json::json!({
        "quote": quote,
        "summary": quote.summary(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
