//! Intake normalization for registry domain entries.
//!
//! The registry dump is noisy: mixed case, stray separators, wildcard
//! prefixes, raw IPv4 entries and internationalized names all occur.
//! `normalize` turns one raw line into the canonical ASCII form the
//! resolution engine admits, or reports why the line must be skipped.

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Normalizes one raw registry entry into an admitted domain name.
///
/// Lower-cases, strips a single trailing dot, repairs comma-for-dot
/// typos, removes embedded spaces, rejects IPv4 literals, applies IDNA
/// ASCII encoding and drops a leading wildcard label. Returns the skip
/// reason when the entry cannot be admitted.
pub fn normalize(raw: &str) -> Result<String, String> {
    let mut name = raw.trim().to_ascii_lowercase();
    if let Some(stripped) = name.strip_suffix('.') {
        name = stripped.to_string();
    }
    name = name.replace(',', ".").replace(' ', "");

    if name.is_empty() {
        return Err("empty entry".to_string());
    }
    if name.parse::<std::net::Ipv4Addr>().is_ok() {
        return Err("IPv4 literal".to_string());
    }

    let ascii = idna::domain_to_ascii(&name).map_err(|e| format!("IDNA parse error: {e}"))?;
    let ascii = ascii.strip_prefix("*.").unwrap_or(&ascii).to_string();

    if ascii.is_empty() {
        return Err("empty entry".to_string());
    }
    if !is_hostname(&ascii) {
        return Err(format!("not a valid hostname: {ascii}"));
    }
    Ok(ascii)
}

/// Hostname syntax check on an already-ASCII name: bounded total and
/// label lengths, alphanumeric/hyphen/underscore labels, no hyphen at
/// a label edge.
pub fn is_hostname(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    for label in name.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return false;
        }
    }
    true
}
