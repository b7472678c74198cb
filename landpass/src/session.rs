//! Scripted page sessions.
//!
//! A script has one event per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! click 45.5 -93.25
//! latitude 45.5
//! longitude -93.25
//! name My field
//! submit
//! ```
use anyhow::{Context, Result, anyhow};
use liblandpass::{
    api::HttpApi,
    app::{App, UiEvent},
    headless::{HeadlessMap, HeadlessPage},
    map::LatLng,
    page::Field,
};
use tracing::debug;

pub type HeadlessApp = App<HeadlessMap, HeadlessPage, HttpApi>;

fn parse_line(line: &str) -> Result<Option<UiEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((line, ""));
    let event = match command {
        "click" => {
            let mut coords = rest.split_whitespace().map(str::parse::<f64>);
            match (coords.next(), coords.next(), coords.next()) {
                (Some(lat), Some(lng), None) => UiEvent::MapClick(LatLng::new(
                    lat.with_context(|| "Invalid latitude")?,
                    lng.with_context(|| "Invalid longitude")?,
                )),
                _ => return Err(anyhow!("Expected 'click <latitude> <longitude>'")),
            }
        }
        "latitude" => UiEvent::Edit(Field::Latitude, rest.to_string()),
        "longitude" => UiEvent::Edit(Field::Longitude, rest.to_string()),
        "name" => UiEvent::Edit(Field::Name, rest.to_string()),
        "submit" if rest.is_empty() => UiEvent::SubmitPressed,
        _ => return Err(anyhow!("Unknown command '{line}'")),
    };
    Ok(Some(event))
}

pub fn parse_script(script: &str) -> Result<Vec<UiEvent>> {
    script
        .lines()
        .enumerate()
        .filter_map(|(n, line)| {
            parse_line(line)
                .with_context(|| format!("Error on line {}", n + 1))
                .transpose()
        })
        .collect()
}

/// Load the page, play back `events` and wait until every request has finished
pub async fn replay(app: HeadlessApp, events: Vec<UiEvent>) -> HeadlessApp {
    let dispatcher = app.dispatcher();
    debug!(count = events.len(), "replaying events");
    dispatcher.send(UiEvent::Loaded);
    for event in events {
        dispatcher.send(event);
    }
    dispatcher.send(UiEvent::Unload);
    app.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = r#"
# pick a spot
click 45.5 -93.25
name   My field
latitude
longitude -93.0

submit
"#;
        let events = parse_script(script).expect("Failed to parse script");
        assert_eq!(
            events,
            vec![
                UiEvent::MapClick(LatLng::new(45.5, -93.25)),
                UiEvent::Edit(Field::Name, "My field".into()),
                UiEvent::Edit(Field::Latitude, "".into()),
                UiEvent::Edit(Field::Longitude, "-93.0".into()),
                UiEvent::SubmitPressed,
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        for script in [
            "click 45.5",
            "click 45.5 -93 1",
            "click north -93",
            "submit now",
            "zoom 4",
        ] {
            assert!(parse_script(script).is_err(), "'{script}' should not parse");
        }
        let err = parse_script("submit\nbogus").unwrap_err();
        assert_eq!(err.to_string(), "Error on line 2");
    }
}
