//! Record formatting.
//!
//! Text blocks look like `ip:port [host]`, followed by one labeled line per
//! enrichment field when enrichment is on. JSON records are single-line
//! objects; batches are a pretty-printed array.

use std::fmt::Write;

use crate::error_handling::OutputError;
use crate::models::HostRecord;

/// Formats one record as a text block (always newline-terminated).
pub fn format_text(record: &HostRecord, enriched: bool) -> String {
    let mut out = format!("{}:{} [{}]\n", record.ip, record.port, record.host);
    if enriched {
        for (label, value) in enrichment_lines(record) {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    out
}

/// Formats one record as a JSON line (newline-terminated).
pub fn format_json_line(record: &HostRecord) -> Result<String, OutputError> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    Ok(line)
}

/// Formats every record as one pretty-printed JSON array.
pub fn format_json_array(records: &[HostRecord]) -> Result<String, OutputError> {
    let mut out = serde_json::to_string_pretty(records)?;
    out.push('\n');
    Ok(out)
}

/// Concatenates the text blocks of every record.
pub fn format_text_batch(records: &[HostRecord], enriched: bool) -> String {
    records
        .iter()
        .map(|record| format_text(record, enriched))
        .collect()
}

/// Labeled enrichment values in display order; absent values print empty.
fn enrichment_lines(record: &HostRecord) -> Vec<(&'static str, String)> {
    let fp = &record.fingerprints;
    let geo = &record.geo;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let coord = |value: Option<f64>| value.map(|v| format!("{v:.6}")).unwrap_or_default();

    vec![
        ("CTLS", text(&fp.ctls)),
        ("ZTLS", text(&fp.ztls)),
        ("OpenSSL", text(&fp.openssl)),
        ("Network", text(&geo.network)),
        ("Version", text(&geo.version)),
        ("City", text(&geo.city)),
        ("Region", text(&geo.region)),
        ("RegionCode", text(&geo.region_code)),
        ("Country", text(&geo.country)),
        ("CountryName", text(&geo.country_name)),
        ("CountryCode", text(&geo.country_code)),
        ("Latitude", coord(geo.latitude)),
        ("Longitude", coord(geo.longitude)),
        ("Timezone", text(&geo.timezone)),
        ("Org", text(&geo.org)),
    ]
}
