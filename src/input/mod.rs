//! Target list parsing.
//!
//! Each input line names one target as `address`, `address:port` or
//! `[ipv6]:port`. Blank lines and `#` comments are skipped.

use crate::config::DEFAULT_PORT;
use crate::models::Target;

/// Parses one input line into a target.
///
/// Returns `None` for blank lines and comments. A missing or empty port
/// becomes [`DEFAULT_PORT`]. A bare IPv6 literal (more than one colon and no
/// brackets) is taken whole as the address.
///
/// # Examples
///
/// ```
/// use certhost::input::parse_target;
///
/// let target = parse_target("93.184.216.34:8443").unwrap();
/// assert_eq!(target.address, "93.184.216.34");
/// assert_eq!(target.port, "8443");
/// ```
pub fn parse_target(line: &str) -> Option<Target> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (address, port) = if let Some(rest) = trimmed.strip_prefix('[') {
        match rest.split_once(']') {
            Some((address, tail)) => (address, tail.strip_prefix(':').unwrap_or("")),
            None => (rest, ""),
        }
    } else {
        match trimmed.matches(':').count() {
            0 => (trimmed, ""),
            1 => trimmed.split_once(':').unwrap_or((trimmed, "")),
            _ => (trimmed, ""),
        }
    };

    let port = port.trim();
    Some(Target {
        address: address.trim().to_string(),
        port: if port.is_empty() {
            DEFAULT_PORT.to_string()
        } else {
            port.to_string()
        },
    })
}
