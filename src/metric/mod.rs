pub mod complexity;
pub mod length;
pub mod predictability;

pub use complexity::{calculate_complexity, complexity_reward, CharClassCounts};
pub use length::calculate_length;
pub use predictability::{calculate_predictability, edit_distance, similarity, Predictability};

/// default upper bound on candidate length accepted at the boundary
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// boundary check for a candidate password: printable ascii only,
/// between 1 and `max_length` characters.
pub fn validate_password(password: &str, max_length: usize) -> Result<(), String> {
    if password.is_empty() {
        return Err("password is empty".to_string());
    }
    if let Some(ch) = password.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(format!(
            "password contains unsupported character {:?} (printable ascii only)",
            ch
        ));
    }
    if password.len() > max_length {
        return Err(format!(
            "password is longer than {} characters",
            max_length
        ));
    }
    Ok(())
}
