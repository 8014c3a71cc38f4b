//! Public identifiers and generated credentials.
//!
//! Every account and record gets a human-readable id made of a type prefix
//! followed by ten random digits, e.g. `C4821937705` or `VR1029384756`.

use rand::Rng;
use rand::distributions::Alphanumeric;

pub const ADMIN_PREFIX: &str = "A";
pub const CITIZEN_PREFIX: &str = "C";
pub const HCP_PREFIX: &str = "HCP";
pub const HOSPITAL_PREFIX: &str = "H";
pub const MOH_PREFIX: &str = "MOH";
pub const VACCINE_PREFIX: &str = "VAC";
pub const VACCINATION_PREFIX: &str = "VR";

/// Length of the one-time password handed out when an account is registered.
pub const GENERATED_PASSWORD_LEN: usize = 10;

pub fn generate_id(prefix: &str) -> String {
    let digits: u64 = rand::thread_rng().gen_range(1_000_000_000..10_000_000_000);
    format!("{prefix}{digits}")
}

pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id(VACCINATION_PREFIX);
        assert!(id.starts_with("VR"));
        let digits = &id[2..];
        assert_eq!(digits.len(), 10);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(digits.chars().next(), Some('0'));
    }

    #[test]
    fn test_generate_id_multi_char_prefix() {
        let id = generate_id(MOH_PREFIX);
        assert!(id.starts_with("MOH"));
        assert_eq!(id.len(), 13);
    }

    #[test]
    fn test_generate_password() {
        let password = generate_password();
        assert_eq!(password.len(), GENERATED_PASSWORD_LEN);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
