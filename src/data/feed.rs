//! Forecast feed parsing
//!
//! Parses the yr.no-style XML forecast feed into an ordered list of
//! [`ForecastWindow`] entries. Each entry is a `<time from=".." to=".."
//! period="N">` element with a nested `<temperature unit="celsius"
//! value="N"/>` child. Attributes may appear in any order, and extra sibling
//! elements under a `<time>` node (symbol, windSpeed, pressure, ...) are
//! ignored.

use chrono::NaiveDateTime;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::{ForecastWindow, TIME_FORMAT};

/// Errors that can occur while parsing the forecast feed
#[derive(Debug, Error)]
pub enum ParseError {
    /// The feed is not well-formed XML
    #[error("malformed XML in forecast feed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element carries a syntactically invalid attribute
    #[error("malformed attribute in forecast feed: {0}")]
    Attr(#[from] AttrError),

    /// A required attribute is absent
    #[error("forecast entry is missing the '{0}' attribute")]
    MissingAttribute(&'static str),

    /// A `from`/`to` attribute does not hold an ISO local date-time
    #[error("invalid forecast timestamp: {0}")]
    InvalidTimestamp(String),

    /// A temperature `value` attribute is not an integer
    #[error("invalid temperature value: {0}")]
    InvalidTemperature(String),
}

/// A `<time>` element whose children are still being scanned
struct PendingWindow {
    from: NaiveDateTime,
    to: NaiveDateTime,
    period: Option<u32>,
    temperature: Option<i32>,
}

/// Parses raw feed text into forecast windows, preserving feed order.
///
/// Entries without a nested `<temperature>` child are skipped rather than
/// rejected; a requested time falling into such an entry surfaces as
/// not-found at the resolver.
pub fn parse_forecast(xml: &str) -> Result<Vec<ForecastWindow>, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut windows = Vec::new();
    let mut buf = Vec::new();
    let mut pending: Option<PendingWindow> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"time" => {
                        let (from, to, period) = parse_time_attributes(&e)?;
                        pending = Some(PendingWindow {
                            from,
                            to,
                            period,
                            temperature: None,
                        });
                    }
                    b"temperature" => record_temperature(&mut pending, &e)?,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                match name.as_ref() {
                    // A childless entry carries no temperature; validate its
                    // attributes, then drop it.
                    b"time" => {
                        parse_time_attributes(&e)?;
                    }
                    b"temperature" => record_temperature(&mut pending, &e)?,
                    _ => {}
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"time" {
                    if let Some(window) = pending.take() {
                        if let Some(temperature) = window.temperature {
                            windows.push(ForecastWindow {
                                from: window.from,
                                to: window.to,
                                period: window.period,
                                temperature,
                            });
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(windows)
}

/// Records the first `<temperature>` child seen under the open `<time>` entry.
fn record_temperature(
    pending: &mut Option<PendingWindow>,
    element: &BytesStart,
) -> Result<(), ParseError> {
    if let Some(window) = pending {
        if window.temperature.is_none() {
            window.temperature = Some(parse_temperature_value(element)?);
        }
    }
    Ok(())
}

/// Extracts `from`, `to`, and the optional `period` from a `<time>` element.
fn parse_time_attributes(
    element: &BytesStart,
) -> Result<(NaiveDateTime, NaiveDateTime, Option<u32>), ParseError> {
    let mut from = None;
    let mut to = None;
    let mut period = None;

    for attr in element.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"from" => from = Some(parse_timestamp(&String::from_utf8_lossy(&attr.value))?),
            b"to" => to = Some(parse_timestamp(&String::from_utf8_lossy(&attr.value))?),
            b"period" => period = String::from_utf8_lossy(&attr.value).trim().parse().ok(),
            _ => {}
        }
    }

    let from = from.ok_or(ParseError::MissingAttribute("from"))?;
    let to = to.ok_or(ParseError::MissingAttribute("to"))?;
    Ok((from, to, period))
}

/// Extracts the integer `value` attribute from a `<temperature>` element.
fn parse_temperature_value(element: &BytesStart) -> Result<i32, ParseError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"value" {
            let raw = String::from_utf8_lossy(&attr.value);
            return raw
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidTemperature(raw.into_owned()));
        }
    }
    Err(ParseError::MissingAttribute("value"))
}

/// Parses an ISO local date-time, with or without seconds.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ParseError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, TIME_FORMAT) {
        return Ok(dt);
    }
    // Some feeds omit the seconds
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    Err(ParseError::InvalidTimestamp(raw.to_string()))
}
