//! Report identifiers
//!
//! `RPT-` followed by the uppercased base-36 millisecond timestamp. Two
//! reports generated in the same millisecond share an id, which is fine for a
//! label printed on paper and not fine for a primary key.

pub const REPORT_ID_PREFIX: &str = "RPT-";

/// Identifier for a report generated now
pub fn new_report_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    report_id_from_millis(millis)
}

pub fn report_id_from_millis(millis: u64) -> String {
    format!("{}{}", REPORT_ID_PREFIX, to_base36_upper(millis))
}

fn to_base36_upper(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Prefix plus a non-empty uppercase base-36 token
pub fn is_well_formed(id: &str) -> bool {
    match id.strip_prefix(REPORT_ID_PREFIX) {
        Some(token) => {
            !token.is_empty()
                && token
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(report_id_from_millis(0), "RPT-0");
        assert_eq!(report_id_from_millis(35), "RPT-Z");
        assert_eq!(report_id_from_millis(36), "RPT-10");
        // 2024-01-01T00:00:00Z
        assert_eq!(report_id_from_millis(1_704_067_200_000), "RPT-LQU5M2O0");
    }

    #[test]
    fn test_new_id_is_well_formed() {
        let id = new_report_id();
        assert!(is_well_formed(&id), "{}", id);
    }

    #[test]
    fn test_malformed_ids() {
        assert!(!is_well_formed("RPT-"));
        assert!(!is_well_formed("RPT-abc"));
        assert!(!is_well_formed("REPORT-ABC"));
    }
}
