//! Display-time name masking.
//!
//! Not reversible and not a security control: the stored name is protected
//! by [`crate::crypto`]. Masking only keeps full names off listing screens.

/// Parts this long or shorter are shown as-is.
const MIN_MASKED_LEN: usize = 3;

/// Mask a plaintext full name for display.
///
/// Every whitespace-separated part except the last keeps its first and last
/// character and has the interior replaced with `*`. The last part (surname)
/// is left alone, unless it is the only part, in which case it is masked like
/// a first name. Parts shorter than three characters are never masked.
pub fn mask_name(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    match parts.split_last() {
        None => String::new(),
        Some((only, [])) => mask_part(only),
        Some((surname, given)) => {
            let mut masked: Vec<String> = given.iter().map(|p| mask_part(p)).collect();
            masked.push((*surname).to_string());
            masked.join(" ")
        }
    }
}

fn mask_part(part: &str) -> String {
    let len = part.chars().count();
    if len < MIN_MASKED_LEN {
        return part.to_string();
    }

    part.chars()
        .enumerate()
        .map(|(i, c)| if i == 0 || i == len - 1 { c } else { '*' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_first_name_keeps_surname() {
        assert_eq!(mask_name("John Doe"), "J**n Doe");
        assert_eq!(mask_name("Jane Smith"), "J**e Smith");
        assert_eq!(mask_name("Jim Doe"), "J*m Doe");
    }

    #[test]
    fn short_parts_are_not_masked() {
        assert_eq!(mask_name("Al Pacino"), "Al Pacino");
        assert_eq!(mask_name("Jo"), "Jo");
        assert_eq!(mask_name("J"), "J");
    }

    #[test]
    fn single_long_part_is_masked() {
        assert_eq!(mask_name("Anastasia"), "A*******a");
    }

    #[test]
    fn every_part_but_the_last_is_masked() {
        assert_eq!(mask_name("Mary Ann Lee"), "M**y A*n Lee");
        assert_eq!(mask_name("Jo Ann Lee"), "Jo A*n Lee");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(mask_name("  John   Doe "), "J**n Doe");
    }

    #[test]
    fn blank_name_masks_to_empty() {
        assert_eq!(mask_name(""), "");
        assert_eq!(mask_name("   "), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(mask_name("Zoë"), "Z*ë");
        assert_eq!(mask_name("Ém Li"), "Ém Li");
    }

    #[test]
    fn masking_is_deterministic() {
        assert_eq!(mask_name("Anastasia Romanova"), mask_name("Anastasia Romanova"));
    }
}
