use std::io::Write;
use std::time::Duration;

use clap::Args;
use tiltboard_core::{DurationInput, Event};

#[derive(Args)]
pub struct CountdownArgs {
    /// Minutes field (blank or malformed counts as zero)
    #[arg(long, default_value = "")]
    minutes: String,
    /// Seconds field (blank or malformed counts as zero)
    #[arg(long, default_value = "")]
    seconds: String,
}

pub async fn run(args: CountdownArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut dash = super::dashboard();
    let input = DurationInput::parse_lenient(&args.minutes, &args.seconds);
    if let Some(event) = dash.countdown_start(input) {
        super::print_event(&event)?;
    }

    let mut frames = tokio::time::interval(Duration::from_millis(
        dash.config().frame.interval_ms.max(1),
    ));
    while dash.needs_frames() {
        frames.tick().await;
        let events = dash.frame();
        eprint!("\r{}", dash.state().countdown.readout());
        std::io::stderr().flush()?;
        for event in &events {
            eprintln!();
            super::print_event(event)?;
            if matches!(event, Event::CountdownCompleted { .. }) {
                return Ok(());
            }
        }
    }
    Ok(())
}
