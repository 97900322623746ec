// character-class complexity metric
//
// complexity = (26 * lowercase + 26 * uppercase + 10 * digits + 33 * special)
//              * 0.25 * number of classes present

/// weight of each character class (size of the class alphabet)
const LOWERCASE_WEIGHT: usize = 26;
const UPPERCASE_WEIGHT: usize = 26;
const DIGIT_WEIGHT: usize = 10;
const SPECIAL_WEIGHT: usize = 33;

/// reward factor per character class present
const CLASS_REWARD: f64 = 0.25;

/// per-class character counts of a password
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClassCounts {
    pub lowercase: usize,
    pub uppercase: usize,
    pub digits: usize,
    pub special: usize,
}

impl CharClassCounts {
    /// classify every character. control characters belong to no class.
    pub fn of(password: &str) -> Self {
        let mut counts = Self::default();
        for ch in password.chars() {
            if ch.is_control() {
                continue;
            } else if ch.is_lowercase() {
                counts.lowercase += 1;
            } else if ch.is_uppercase() {
                counts.uppercase += 1;
            } else if ch.is_numeric() {
                counts.digits += 1;
            } else {
                counts.special += 1;
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.lowercase + self.uppercase + self.digits + self.special
    }

    /// number of classes with at least one character
    pub fn class_count(&self) -> usize {
        [self.lowercase, self.uppercase, self.digits, self.special]
            .iter()
            .filter(|&&n| n > 0)
            .count()
    }

    /// weighted character sum before the class reward
    pub fn weighted_sum(&self) -> usize {
        self.lowercase * LOWERCASE_WEIGHT
            + self.uppercase * UPPERCASE_WEIGHT
            + self.digits * DIGIT_WEIGHT
            + self.special * SPECIAL_WEIGHT
    }
}

/// complexity score of a password
pub fn calculate_complexity(password: &str) -> f64 {
    let counts = CharClassCounts::of(password);
    complexity_reward(counts.weighted_sum(), &counts)
}

/// scale a weighted sum by 0.25 per character class present
pub fn complexity_reward(weighted_sum: usize, counts: &CharClassCounts) -> f64 {
    weighted_sum as f64 * CLASS_REWARD * counts.class_count() as f64
}
