//! Offline walkthrough of one reporting day.
//!
//! Drives a session through Departure, a noon report, a sea passage bracket
//! with a rejected sequence attempt, and an Arrival, all with prefilled
//! placeholder values. No network access; run with RUST_LOG=debug to watch
//! the rule verdicts.

use anyhow::Result;
use noon_poc::{placeholder, ReportSession, ReportType};
use tracing_subscriber::EnvFilter;

fn submit_prefilled(session: &mut ReportSession, report_type: ReportType) -> Result<()> {
    session.start_report(report_type)?;

    let instance = placeholder::sample_instance(
        session.catalog(),
        session.registry(),
        report_type,
    )?;
    for (key, value) in instance.values {
        if let Some(warning) = session.set_field(key, value)? {
            println!("  warning: {}", warning.message);
        }
    }

    let outcome = session.submit()?;
    println!(
        "submitted {} at {} ({} warnings)",
        outcome.report_type,
        outcome.submitted_at.format("%H:%M:%S UTC"),
        outcome.warnings.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut session = ReportSession::new();
    println!("session {}\n", session.session_id());

    submit_prefilled(&mut session, ReportType::Departure)?;
    submit_prefilled(&mut session, ReportType::NoonSeaPassage)?;
    submit_prefilled(&mut session, ReportType::BeginOfSeaPassage)?;

    // An arrival may not interrupt an open sea passage.
    match session.start_report(ReportType::Arrival) {
        Err(e) => println!("rejected as expected: {}", e),
        Ok(()) => anyhow::bail!("sequence rules should have rejected Arrival"),
    }

    submit_prefilled(&mut session, ReportType::EndOfSeaPassage)?;
    submit_prefilled(&mut session, ReportType::Arrival)?;

    println!("\nhistory:");
    for report_type in session.history().entries() {
        println!("  {}", report_type);
    }

    Ok(())
}
