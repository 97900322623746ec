// password length metric

/// number of unicode scalar values in the password
pub fn calculate_length(password: &str) -> usize {
    password.chars().count()
}
