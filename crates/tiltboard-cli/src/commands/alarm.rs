use std::time::Duration;

use clap::Args;

#[derive(Args)]
pub struct AlarmArgs {
    /// Time of day, HH:MM (24h)
    #[arg(long)]
    at: String,
}

pub async fn run(args: AlarmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut dash = super::dashboard();
    match dash.alarm_set(&args.at)? {
        Some(event) => super::print_event(&event)?,
        None => return Err(dash.state().alarm.status().to_string().into()),
    }
    eprintln!("{}", dash.state().alarm.status());

    let mut poll = tokio::time::interval(Duration::from_millis(
        dash.config().alarm.poll_interval_ms.max(1),
    ));
    loop {
        poll.tick().await;
        if let Some(event) = dash.poll_alarm() {
            super::print_event(&event)?;
            eprintln!("{} ({})", dash.state().alarm.status(), dash.clock_readout());
            return Ok(());
        }
    }
}
