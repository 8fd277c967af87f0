//! Form limits loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_MAX_AVATAR_MEGABYTES: u64 = 5;
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
const DEFAULT_MIN_TECHS: usize = 2;
const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Lowest accepted knowledge level.
pub const KNOWLEDGE_MIN: f64 = 1.0;
/// Highest accepted knowledge level.
pub const KNOWLEDGE_MAX: f64 = 100.0;
/// MIME types accepted for the avatar.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Configuration values tuning the profile schema.
///
/// Unset values fall back to [`SchemaLimits::default`].
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROFILE_FORM")]
pub struct FormSettings {
    /// Largest accepted avatar, in megabytes.
    #[ortho_config(default = 5)]
    pub max_avatar_megabytes: u64,
    /// Minimum password length in characters.
    #[ortho_config(default = 6)]
    pub min_password_length: usize,
    /// Minimum number of valid skill entries.
    #[ortho_config(default = 2, file_key = "min_technologies")]
    pub min_techs: usize,
}

impl FormSettings {
    /// Return the configured avatar limit.
    #[must_use]
    pub const fn max_avatar_megabytes(&self) -> u64 {
        self.max_avatar_megabytes
    }

    /// Return the configured password length.
    #[must_use]
    pub const fn min_password_length(&self) -> usize {
        self.min_password_length
    }

    /// Return the configured skill count.
    #[must_use]
    pub const fn min_techs(&self) -> usize {
        self.min_techs
    }

    /// Resolve the limits the schema is built from.
    #[must_use]
    pub const fn limits(&self) -> SchemaLimits {
        SchemaLimits {
            max_avatar_megabytes: self.max_avatar_megabytes(),
            min_password_length: self.min_password_length(),
            min_techs: self.min_techs(),
        }
    }
}

/// Resolved limits used by the standard profile schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaLimits {
    /// Largest accepted avatar, in megabytes.
    pub max_avatar_megabytes: u64,
    /// Minimum password length in characters.
    pub min_password_length: usize,
    /// Minimum number of valid skill entries.
    pub min_techs: usize,
}

impl SchemaLimits {
    /// Largest accepted avatar, in bytes.
    #[must_use]
    pub const fn max_avatar_bytes(&self) -> u64 {
        self.max_avatar_megabytes.saturating_mul(BYTES_PER_MEGABYTE)
    }
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            max_avatar_megabytes: DEFAULT_MAX_AVATAR_MEGABYTES,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            min_techs: DEFAULT_MIN_TECHS,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for form settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> FormSettings {
        FormSettings::load_from_iter([OsString::from("profile-form")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("PROFILE_FORM_MAX_AVATAR_MEGABYTES", None::<String>),
            ("PROFILE_FORM_MIN_PASSWORD_LENGTH", None::<String>),
            ("PROFILE_FORM_MIN_TECHS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.limits(), SchemaLimits::default());
        assert_eq!(settings.limits().max_avatar_bytes(), 5_242_880);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PROFILE_FORM_MAX_AVATAR_MEGABYTES", Some("2".to_owned())),
            ("PROFILE_FORM_MIN_PASSWORD_LENGTH", Some("10".to_owned())),
            ("PROFILE_FORM_MIN_TECHS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.limits(),
            SchemaLimits {
                max_avatar_megabytes: 2,
                min_password_length: 10,
                min_techs: 3,
            }
        );
        assert_eq!(settings.limits().max_avatar_bytes(), 2_097_152);
    }

    #[rstest]
    fn partial_overrides_keep_remaining_defaults() {
        let _guard = lock_env([
            ("PROFILE_FORM_MAX_AVATAR_MEGABYTES", None::<String>),
            ("PROFILE_FORM_MIN_PASSWORD_LENGTH", Some("8".to_owned())),
            ("PROFILE_FORM_MIN_TECHS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.max_avatar_megabytes(), 5);
        assert_eq!(settings.min_password_length(), 8);
        assert_eq!(settings.min_techs(), 2);
    }

    #[test]
    fn default_limits_match_documented_constants() {
        let limits = SchemaLimits::default();
        assert_eq!(limits.max_avatar_bytes(), 5_242_880);
        assert_eq!(limits.min_password_length, 6);
        assert_eq!(limits.min_techs, 2);
    }
}
