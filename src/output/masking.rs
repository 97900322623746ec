// password masking for reports

/// mask a password for display.
/// shows first 2 and last 2 chars: "pa****rd".
/// short passwords (< 6 chars) are replaced entirely with "x".
pub fn mask_password(password: &str) -> String {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() < 6 {
        "x".repeat(chars.len())
    } else {
        let first: String = chars[..2].iter().collect();
        let last: String = chars[chars.len() - 2..].iter().collect();
        let middle = "*".repeat(chars.len() - 4);
        format!("{first}{middle}{last}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_empty() {
        assert_eq!(mask_password(""), "");
    }

    #[test]
    fn mask_short_passwords_fully() {
        assert_eq!(mask_password("a"), "x");
        assert_eq!(mask_password("abcde"), "xxxxx");
    }

    #[test]
    fn mask_keeps_edges_from_six_chars() {
        assert_eq!(mask_password("abcdef"), "ab**ef");
        assert_eq!(mask_password("password"), "pa****rd");
    }

    #[test]
    fn mask_counts_chars_not_bytes() {
        assert_eq!(mask_password("äöüßéè"), "äö**éè");
    }

    #[test]
    fn mask_never_exposes_full_password() {
        for pw in ["Tr0ub4dor&3", "correct horse battery staple", "qwerty"] {
            assert_ne!(mask_password(pw), pw);
        }
    }
}
