//! Attribute Convention for Data Discovery (ACDD) 1.3.
//!
//! The catalogue lists the highly recommended, recommended and suggested
//! global attributes of <https://wiki.esipfed.org/Attribute_Convention_for_Data_Discovery_1-3>.
//! [`check`] compares a [`GlobalAttributes`] record against it. The check is
//! advisory and never rejects a record.

use super::global::DEFAULT_CONVENTIONS;
use super::{AttrValue, GlobalAttributes};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

/// How strongly ACDD asks for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AcddLevel {
    /// Highly recommended.
    HighlyRecommended,
    /// Recommended.
    Recommended,
    /// Suggested.
    Suggested,
}

impl AcddLevel {
    /// Human readable level name.
    pub fn name(self) -> &'static str {
        match self {
            AcddLevel::HighlyRecommended => "highly recommended",
            AcddLevel::Recommended => "recommended",
            AcddLevel::Suggested => "suggested",
        }
    }
}

/// Expected value format of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// ISO 8601 date or date-time.
    DateTime,
    /// ISO 8601 duration.
    Duration,
}

impl ValueFormat {
    /// Whether `value` is written in this format.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            ValueFormat::DateTime => is_iso8601_datetime(value),
            ValueFormat::Duration => is_iso8601_duration(value),
        }
    }
}

/// One catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct AcddAttribute {
    /// Attribute name.
    pub name: &'static str,
    /// Level of the attribute.
    pub level: AcddLevel,
    /// Expected value format, if constrained.
    pub format: Option<ValueFormat>,
    /// Value used by [`apply_defaults`].
    pub default: Option<&'static str>,
}

const fn attr(name: &'static str, level: AcddLevel) -> AcddAttribute {
    AcddAttribute {
        name,
        level,
        format: None,
        default: None,
    }
}

const fn formatted(name: &'static str, level: AcddLevel, format: ValueFormat) -> AcddAttribute {
    AcddAttribute {
        name,
        level,
        format: Some(format),
        default: None,
    }
}

use AcddLevel::{HighlyRecommended as HREC, Recommended as REC, Suggested as SUG};
use ValueFormat::{DateTime as DT, Duration as DUR};

/// The ACDD 1.3 catalogue.
pub const CATALOGUE: &[AcddAttribute] = &[
    attr("title", HREC),
    attr("summary", HREC),
    attr("keywords", HREC),
    AcddAttribute {
        name: "Conventions",
        level: HREC,
        format: None,
        default: Some(DEFAULT_CONVENTIONS),
    },
    attr("id", REC),
    attr("naming_authority", REC),
    attr("history", REC),
    attr("source", REC),
    attr("processing_level", REC),
    attr("comment", REC),
    attr("acknowledgement", REC),
    attr("license", REC),
    attr("standard_name_vocabulary", REC),
    formatted("date_created", REC, DT),
    attr("creator_name", REC),
    attr("creator_email", REC),
    attr("creator_url", REC),
    attr("institution", REC),
    attr("project", REC),
    attr("publisher_name", REC),
    attr("publisher_email", REC),
    attr("publisher_url", REC),
    attr("geospatial_bounds", REC),
    attr("geospatial_bounds_crs", REC),
    attr("geospatial_bounds_vertical_crs", REC),
    attr("geospatial_lat_min", REC),
    attr("geospatial_lat_max", REC),
    attr("geospatial_lon_min", REC),
    attr("geospatial_lon_max", REC),
    attr("geospatial_vertical_min", REC),
    attr("geospatial_vertical_max", REC),
    attr("geospatial_vertical_positive", REC),
    formatted("time_coverage_start", REC, DT),
    formatted("time_coverage_end", REC, DT),
    formatted("time_coverage_duration", REC, DUR),
    formatted("time_coverage_resolution", REC, DUR),
    attr("creator_type", SUG),
    attr("creator_institution", SUG),
    attr("publisher_type", SUG),
    attr("publisher_institution", SUG),
    attr("program", SUG),
    attr("contributor_name", SUG),
    attr("contributor_role", SUG),
    attr("geospatial_lat_units", SUG),
    attr("geospatial_lat_resolution", SUG),
    attr("geospatial_lon_units", SUG),
    attr("geospatial_lon_resolution", SUG),
    attr("geospatial_vertical_units", SUG),
    attr("geospatial_vertical_resolution", SUG),
    formatted("date_modified", SUG, DT),
    formatted("date_issued", SUG, DT),
    formatted("date_metadata_modified", SUG, DT),
    attr("product_version", SUG),
    attr("keywords_vocabulary", SUG),
    attr("platform", SUG),
    attr("platform_vocabulary", SUG),
    attr("instrument", SUG),
    attr("instrument_vocabulary", SUG),
    attr("cdm_data_type", SUG),
    attr("metadata_link", SUG),
    attr("references", SUG),
];

/// Catalogue entries of one level.
pub fn attributes(level: AcddLevel) -> impl Iterator<Item = &'static AcddAttribute> {
    CATALOGUE.iter().filter(move |a| a.level == level)
}

/// A set attribute whose value does not match its expected format.
#[derive(Debug, Clone, PartialEq)]
pub struct Malformed {
    /// Attribute name.
    pub name: &'static str,
    /// Offending value.
    pub value: AttrValue,
    /// Expected format.
    pub format: ValueFormat,
}

/// Result of [`check`].
#[derive(Debug, Clone, Default)]
pub struct AcddReport {
    missing: Vec<&'static AcddAttribute>,
    malformed: Vec<Malformed>,
}

impl AcddReport {
    /// Names of missing attributes of the given level.
    pub fn missing(&self, level: AcddLevel) -> Vec<&'static str> {
        self.missing
            .iter()
            .filter(|a| a.level == level)
            .map(|a| a.name)
            .collect()
    }

    /// Attributes with malformed values.
    pub fn malformed(&self) -> &[Malformed] {
        &self.malformed
    }

    /// No highly recommended attribute is missing and no value is malformed.
    pub fn is_compliant(&self) -> bool {
        self.malformed.is_empty() && self.missing(AcddLevel::HighlyRecommended).is_empty()
    }
}

impl fmt::Display for AcddReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "acdd-1.3 {{")?;
        for level in [HREC, REC, SUG] {
            let missing = self.missing(level);
            if !missing.is_empty() {
                writeln!(f, "  missing {}: {}", level.name(), missing.join(", "))?;
            }
        }
        for m in &self.malformed {
            writeln!(f, "  malformed {}: {:?} is not an ISO 8601 {:?}", m.name, m.value.to_string(), m.format)?;
        }
        write!(
            f,
            "}}\nSummary: {}",
            if self.is_compliant() { "compliant" } else { "not compliant" }
        )
    }
}

/// Compare global attributes against the ACDD 1.3 catalogue.
pub fn check(attrs: &GlobalAttributes) -> AcddReport {
    let mut report = AcddReport::default();

    for entry in CATALOGUE {
        let Some(value) = attrs.get(entry.name) else {
            report.missing.push(entry);
            continue;
        };

        if let Some(format) = entry.format {
            let ok = value.as_str().map(|s| format.accepts(s)).unwrap_or(false);
            if !ok {
                report.malformed.push(Malformed {
                    name: entry.name,
                    value,
                    format,
                });
            }
        }
    }

    tracing::debug!(
        missing = report.missing.len(),
        malformed = report.malformed.len(),
        "ACDD check finished"
    );
    report
}

/// Fill unset attributes that have a catalogue default.
pub fn apply_defaults(attrs: &mut GlobalAttributes) -> Result<()> {
    for entry in CATALOGUE {
        if let Some(default) = entry.default {
            if !attrs.contains(entry.name) {
                attrs.set(entry.name, default)?;
            }
        }
    }
    Ok(())
}

fn is_iso8601_datetime(value: &str) -> bool {
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y%m%dT%H%M%S",
        "%Y%m%dT%H%M%SZ",
    ];

    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_str(value, "%Y%m%dT%H%M%S%z").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(value, "%Y%m%d").is_ok()
        || NAIVE_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

/// `PnYnMnWnDTnHnMnS` with at least one component; only the last component
/// may carry a decimal fraction.
fn is_iso8601_duration(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('P') else {
        return false;
    };
    let (date_part, time_part) = match rest.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (rest, None),
    };

    let mut components = 0;
    let mut fraction_seen = false;
    let mut walk = |part: &str, designators: &str| -> bool {
        let mut number = String::new();
        let mut order = 0;
        for c in part.chars() {
            if c.is_ascii_digit() || c == '.' || c == ',' {
                number.push(c);
                continue;
            }
            let Some(pos) = designators.find(c) else {
                return false;
            };
            if !is_duration_number(&number) || pos < order || fraction_seen {
                return false;
            }
            if number.contains(['.', ',']) {
                fraction_seen = true;
            }
            order = pos + 1;
            components += 1;
            number.clear();
        }
        number.is_empty()
    };

    if !walk(date_part, "YMWD") {
        return false;
    }
    if let Some(time_part) = time_part {
        if time_part.is_empty() || !walk(time_part, "HMS") {
            return false;
        }
    }
    components > 0
}

/// Digits with an optional `.` or `,` decimal fraction.
fn is_duration_number(number: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match number.split_once(['.', ',']) {
        Some((whole, fraction)) => digits(whole) && digits(fraction),
        None => digits(number),
    }
}
