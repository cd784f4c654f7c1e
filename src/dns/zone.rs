//! Reverse-lookup zone names.

use std::fmt::Write;
use std::net::IpAddr;

/// Builds the canonical reverse-lookup name for an address.
///
/// IPv4 addresses map to `d.c.b.a.in-addr.arpa.`, IPv6 addresses to the
/// 32-nibble form under `ip6.arpa.`. The result is fully qualified.
pub fn reverse_zone_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}.in-addr.arpa.")
        }
        IpAddr::V6(v6) => {
            let mut name = String::with_capacity(72);
            for byte in v6.octets().iter().rev() {
                // Low nibble first, since the whole address is reversed nibble by nibble.
                let _ = write!(name, "{:x}.{:x}.", byte & 0x0f, byte >> 4);
            }
            name.push_str("ip6.arpa.");
            name
        }
    }
}
