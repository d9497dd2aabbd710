//! Weather panel state.
//!
//! Location lookup and the forecast request belong to the host; this module
//! only turns their outcome into a readout and keeps a stable "no data"
//! state when either one fails.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const UNKNOWN_CONDITION: (&str, &str) = ("Weather", "🌍");

/// Describe a WMO weather interpretation code.
pub fn describe_code(code: u32) -> (&'static str, &'static str) {
    match code {
        0 => ("Clear", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Moderate drizzle", "🌦️"),
        55 => ("Dense drizzle", "🌧️"),
        61 => ("Slight rain", "🌧️"),
        63 => ("Moderate rain", "🌧️"),
        65 => ("Heavy rain", "🌧️"),
        71 => ("Slight snow", "❄️"),
        73 => ("Moderate snow", "❄️"),
        75 => ("Heavy snow", "❄️"),
        80 | 81 => ("Rain showers", "🌧️"),
        82 => ("Violent rain showers", "⛈️"),
        95 => ("Thunderstorm", "⛈️"),
        96 | 99 => ("Thunderstorm w/ hail", "⛈️"),
        _ => UNKNOWN_CONDITION,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn label(&self) -> String {
        format!("{:.3}, {:.3}", self.latitude, self.longitude)
    }
}

/// Forecast fields as returned by the provider; any may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub current_code: Option<u32>,
    #[serde(default)]
    pub daily_code: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
}

impl WeatherReport {
    /// Current code, else today's, else clear sky.
    pub fn code(&self) -> u32 {
        self.current_code.or(self.daily_code).unwrap_or(0)
    }
}

/// Host-side provider: locate the device and fetch its forecast.
pub trait WeatherSource {
    fn locate(&self) -> impl Future<Output = Result<Coordinates, CoreError>> + Send;
    fn forecast(
        &self,
        at: Coordinates,
    ) -> impl Future<Output = Result<WeatherReport, CoreError>> + Send;
}

/// Rendered text for the weather panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReadout {
    pub emoji: String,
    pub place: String,
    pub description: String,
    pub temperature: String,
    pub range: String,
}

impl WeatherReadout {
    pub fn no_data() -> Self {
        Self {
            emoji: UNKNOWN_CONDITION.1.to_string(),
            place: "Location blocked".to_string(),
            description: "Cannot fetch weather without location access".to_string(),
            temperature: "--°".to_string(),
            range: "H --° / L --°".to_string(),
        }
    }

    pub fn locating() -> Self {
        Self {
            place: "Locating…".to_string(),
            ..Self::no_data()
        }
    }

    pub fn from_report(place: &Coordinates, report: &WeatherReport) -> Self {
        let (description, emoji) = describe_code(report.code());
        Self {
            emoji: emoji.to_string(),
            place: place.label(),
            description: description.to_string(),
            temperature: format!("{}°", degrees(report.temperature)),
            range: format!("H {}° / L {}°", degrees(report.high), degrees(report.low)),
        }
    }
}

fn degrees(value: Option<f64>) -> String {
    match value {
        // Half-up rounding, so -0.5 reads as 0 rather than -1.
        Some(v) if v.is_finite() => format!("{}", (v + 0.5).floor() as i64),
        _ => "--".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct WeatherPanel {
    readout: WeatherReadout,
    has_data: bool,
}

impl Default for WeatherPanel {
    fn default() -> Self {
        Self {
            readout: WeatherReadout::no_data(),
            has_data: false,
        }
    }
}

impl WeatherPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn readout(&self) -> &WeatherReadout {
        &self.readout
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Locate, fetch, and update the readout. Any failure leaves the
    /// no-data readout in place.
    pub async fn refresh<S: WeatherSource>(&mut self, source: &S) -> &WeatherReadout {
        self.readout = WeatherReadout::locating();
        let result = async {
            let at = source.locate().await?;
            let report = source.forecast(at).await?;
            Ok::<_, CoreError>((at, report))
        }
        .await;
        self.has_data = result.is_ok();
        self.readout = match result {
            Ok((at, report)) => WeatherReadout::from_report(&at, &report),
            Err(e) => {
                tracing::warn!(error = %e, "weather refresh failed");
                WeatherReadout::no_data()
            }
        };
        &self.readout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<WeatherReport, String>);

    impl WeatherSource for Fixed {
        async fn locate(&self) -> Result<Coordinates, CoreError> {
            Ok(Coordinates {
                latitude: 52.52,
                longitude: 13.405,
            })
        }

        async fn forecast(&self, _at: Coordinates) -> Result<WeatherReport, CoreError> {
            self.0.clone().map_err(CoreError::Custom)
        }
    }

    #[test]
    fn describes_known_and_unknown_codes() {
        assert_eq!(describe_code(3), ("Overcast", "☁️"));
        assert_eq!(describe_code(99), ("Thunderstorm w/ hail", "⛈️"));
        assert_eq!(describe_code(4), ("Weather", "🌍"));
    }

    #[test]
    fn code_prefers_current_then_daily() {
        let mut report = WeatherReport {
            daily_code: Some(61),
            ..Default::default()
        };
        assert_eq!(report.code(), 61);
        report.current_code = Some(2);
        assert_eq!(report.code(), 2);
        assert_eq!(WeatherReport::default().code(), 0);
    }

    #[test]
    fn readout_rounds_and_fills_gaps() {
        let report = WeatherReport {
            current_code: Some(0),
            temperature: Some(17.6),
            high: Some(21.2),
            low: None,
            ..Default::default()
        };
        let at = Coordinates {
            latitude: 1.0,
            longitude: -2.5,
        };
        let readout = WeatherReadout::from_report(&at, &report);
        assert_eq!(readout.place, "1.000, -2.500");
        assert_eq!(readout.temperature, "18°");
        assert_eq!(readout.range, "H 21° / L --°");
        assert_eq!(readout.description, "Clear");
    }

    #[tokio::test]
    async fn failed_fetch_keeps_no_data_state() {
        let mut panel = WeatherPanel::new();
        let readout = panel.refresh(&Fixed(Err("offline".into()))).await.clone();
        assert_eq!(readout, WeatherReadout::no_data());
        assert!(!panel.has_data());
    }

    #[tokio::test]
    async fn successful_fetch_updates_readout() {
        let mut panel = WeatherPanel::new();
        let report = WeatherReport {
            current_code: Some(95),
            temperature: Some(-0.5),
            high: Some(3.0),
            low: Some(-4.0),
            ..Default::default()
        };
        panel.refresh(&Fixed(Ok(report))).await;
        assert_eq!(panel.readout().temperature, "0°");
        assert_eq!(panel.readout().range, "H 3° / L -4°");
        assert_eq!(panel.readout().place, "52.520, 13.405");
        assert!(panel.has_data());
    }
}
