use std::path::Path;

use tiltboard_core::SensorUpdate;

/// Parse a script: one JSON update per line, blank lines and `#` comments
/// skipped.
pub fn parse_script(content: &str) -> Result<Vec<SensorUpdate>, Box<dyn std::error::Error>> {
    let mut updates = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let update: SensorUpdate =
            serde_json::from_str(line).map_err(|e| format!("line {}: {e}", idx + 1))?;
        updates.push(update);
    }
    Ok(updates)
}

pub fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)?;
    let updates = parse_script(&content)?;
    let mut dash = super::dashboard();
    for update in updates {
        if let Some(event) = dash.ingest(update) {
            super::print_event(&event)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiltboard_core::Mode;

    #[test]
    fn skips_comments_and_blank_lines() {
        let script = r#"
# start upright
{"kind":"viewport","width":400,"height":800}

{"kind":"simulated","mode":"landscape-secondary"}
"#;
        let updates = parse_script(script).unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(
            updates[1],
            SensorUpdate::Simulated {
                mode: Mode::LandscapeSecondary
            }
        );
    }

    #[test]
    fn unknown_native_type_is_treated_as_absent() {
        let script = "{\"kind\":\"viewport\",\"width\":400,\"height\":800}\n\
                      {\"kind\":\"native\",\"mode\":\"upside-down\"}";
        let updates = parse_script(script).unwrap();
        assert_eq!(updates[1], SensorUpdate::Native { mode: None });
    }

    #[test]
    fn reports_offending_line() {
        let err = parse_script("{\"kind\":\"viewport\",\"width\":1,\"height\":2}\n{oops}")
            .unwrap_err();
        assert!(err.to_string().starts_with("line 2:"));
    }
}
