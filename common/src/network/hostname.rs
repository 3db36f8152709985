//! Hostname syntax validation.
//!
//! Discovery sources such as the ARP table report free-form host strings;
//! anything that is not a plausible DNS hostname is dropped before it can
//! enter the directory.

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Returns true if `host` is a syntactically valid hostname.
///
/// Each dot-separated label must be 1..=63 characters of ASCII letters,
/// digits or hyphens, and may not start or end with a hyphen. A single
/// trailing dot (FQDN form) is tolerated.
pub fn is_valid(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    host.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_hostnames() {
        assert!(is_valid("printer"));
        assert!(is_valid("printer.local"));
        assert!(is_valid("host-42.example.com"));
        assert!(is_valid("fqdn.example.com."));
    }

    #[test]
    fn rejects_bad_syntax() {
        assert!(!is_valid(""));
        assert!(!is_valid("?"));
        assert!(!is_valid("under_score"));
        assert!(!is_valid("-leading.hyphen"));
        assert!(!is_valid("trailing-.hyphen"));
        assert!(!is_valid("double..dot"));
        assert!(!is_valid(&"a".repeat(64)));
    }
}
