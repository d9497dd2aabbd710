use clap::Args;
use serde::Serialize;
use tiltboard_core::{Mode, Panel, SensorUpdate};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Platform orientation type, e.g. "portrait-secondary"
    #[arg(long)]
    native: Option<Mode>,
    /// Legacy orientation angle (0, 90, 180, -90)
    #[arg(long, allow_hyphen_values = true)]
    angle: Option<i32>,
    /// Gravity in multiples of g, as X,Y,Z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    gravity: Option<[f64; 3]>,
    /// Raw acceleration in m/s², as X,Y,Z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true, conflicts_with = "gravity")]
    accel: Option<[f64; 3]>,
    /// Viewport width
    #[arg(long, default_value_t = 390)]
    width: u32,
    /// Viewport height
    #[arg(long, default_value_t = 844)]
    height: u32,
}

#[derive(Serialize)]
struct Classification {
    mode: Mode,
    label: &'static str,
    panel: Panel,
}

fn parse_triple(raw: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got '{raw}'"));
    };
    let num = |s: &str| s.parse::<f64>().map_err(|e| format!("'{s}': {e}"));
    Ok([num(x)?, num(y)?, num(z)?])
}

pub fn run(args: ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut dash = super::dashboard();
    let g = dash.config().orientation.standard_gravity;

    let mut updates = vec![SensorUpdate::Viewport {
        width: args.width,
        height: args.height,
    }];
    if let Some([x, y, z]) = args.gravity {
        updates.push(SensorUpdate::Motion {
            x: x * g,
            y: y * g,
            z: z * g,
        });
    }
    if let Some([x, y, z]) = args.accel {
        updates.push(SensorUpdate::Motion { x, y, z });
    }
    updates.push(SensorUpdate::LegacyAngle { angle: args.angle });
    updates.push(SensorUpdate::Native { mode: args.native });

    for update in updates {
        dash.ingest(update);
    }

    let mode = dash.classify();
    let out = Classification {
        mode,
        label: mode.label(),
        panel: mode.panel(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_triple() {
        assert_eq!(parse_triple("0, -0.6,1").unwrap(), [0.0, -0.6, 1.0]);
        assert!(parse_triple("1,2").is_err());
        assert!(parse_triple("a,b,c").is_err());
    }
}
