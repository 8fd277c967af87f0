//! Advisory password strength.
//!
//! Strength is display feedback recomputed on every keystroke. It never takes
//! part in validation and cannot block a submit.

use std::fmt;

/// Minimum length for a password to count as strong.
pub const STRONG_PASSWORD_MIN: usize = 8;

/// Live strength rating of a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordStrength {
    /// Mixes lower case, upper case, digits and symbols over enough length.
    Strong,
    /// Anything else.
    Weak,
}

impl PasswordStrength {
    /// Rates a password.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_form::PasswordStrength;
    ///
    /// assert_eq!(PasswordStrength::of("Str0ng!pw"), PasswordStrength::Strong);
    /// assert_eq!(PasswordStrength::of("weakpass"), PasswordStrength::Weak);
    /// ```
    #[must_use]
    pub fn of(password: &str) -> Self {
        if is_strong_password(password) {
            Self::Strong
        } else {
            Self::Weak
        }
    }

    /// Label shown beside the password field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong password",
            Self::Weak => "weak password",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns `true` if the password contains a lower-case ASCII letter, an
/// upper-case ASCII letter, a digit and a character outside `[A-Za-z0-9]`,
/// and is at least [`STRONG_PASSWORD_MIN`] characters long.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= STRONG_PASSWORD_MIN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Abcdef1!", true)]
    #[case("Tr0ub4dor&3", true)]
    #[case("Abcde1!", false)] // Too short
    #[case("abcdefg1!", false)] // No upper case
    #[case("ABCDEFG1!", false)] // No lower case
    #[case("Abcdefgh!", false)] // No digit
    #[case("Abcdefgh1", false)] // No symbol
    #[case("Abcdefg 1", true)] // Space counts as a symbol
    #[case("Ábcdefg1", false)] // Accented letters are not ASCII upper case
    #[case("", false)]
    fn rates_passwords(#[case] password: &str, #[case] expected: bool) {
        assert_eq!(is_strong_password(password), expected);
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(PasswordStrength::Strong.to_string(), "strong password");
        assert_eq!(PasswordStrength::Weak.to_string(), "weak password");
    }
}
