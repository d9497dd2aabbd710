use std::time::Duration;

use clap::Args;

#[derive(Args)]
pub struct StopwatchArgs {
    /// Total run time in milliseconds
    #[arg(long)]
    duration_ms: u64,
    /// Record a lap every N milliseconds
    #[arg(long)]
    lap_every_ms: Option<u64>,
}

pub async fn run(args: StopwatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut dash = super::dashboard();
    if let Some(event) = dash.stopwatch_start() {
        super::print_event(&event)?;
    }

    let mut frames = tokio::time::interval(Duration::from_millis(
        dash.config().frame.interval_ms.max(1),
    ));
    let mut next_lap = args.lap_every_ms.filter(|&every| every > 0);
    loop {
        frames.tick().await;
        dash.frame();
        let elapsed = dash.state().stopwatch.elapsed_ms();
        if let (Some(at), Some(every)) = (next_lap, args.lap_every_ms) {
            if elapsed >= at && elapsed < args.duration_ms {
                if let Some(event) = dash.stopwatch_lap() {
                    super::print_event(&event)?;
                }
                next_lap = Some(at + every);
            }
        }
        if elapsed >= args.duration_ms {
            break;
        }
    }

    if let Some(event) = dash.stopwatch_stop() {
        super::print_event(&event)?;
    }
    let laps: Vec<_> = dash
        .state()
        .stopwatch
        .laps_newest_first()
        .map(|lap| serde_json::json!({ "lap": lap.number, "time": lap.readout() }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&laps)?);
    Ok(())
}
