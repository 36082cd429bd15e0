//! Display-only phone formatting. The stored value is never rewritten: the
//! formatter runs on every frame against whatever the user has typed so far
//! and produces the grouped international form when it can recognise one.

/// Calling codes we know how to group, with the digit groups of the national
/// number. Longer codes must be matched before their prefixes.
const COUNTRY_GROUPS: &[(&str, &[usize])] = &[
    ("971", &[2, 3, 4]),
    ("966", &[2, 3, 4]),
    ("852", &[4, 4]),
    ("353", &[2, 3, 4]),
    ("351", &[3, 3, 3]),
    ("234", &[3, 3, 4]),
    ("1", &[3, 3, 4]),
    ("7", &[3, 3, 2, 2]),
    ("20", &[3, 3, 4]),
    ("27", &[2, 3, 4]),
    ("31", &[1, 4, 4]),
    ("33", &[1, 2, 2, 2, 2]),
    ("34", &[3, 3, 3]),
    ("39", &[3, 3, 4]),
    ("41", &[2, 3, 2, 2]),
    ("44", &[4, 3, 3]),
    ("46", &[2, 3, 2, 2]),
    ("49", &[3, 4, 4]),
    ("52", &[2, 4, 4]),
    ("55", &[2, 5, 4]),
    ("61", &[1, 4, 4]),
    ("62", &[3, 4, 4]),
    ("65", &[4, 4]),
    ("81", &[2, 4, 4]),
    ("82", &[2, 4, 4]),
    ("86", &[3, 4, 4]),
    ("90", &[3, 3, 2, 2]),
    ("91", &[5, 5]),
];

/// Format a phone number for display.
///
/// Numbers entered in international form (`+` followed by a recognised
/// calling code) are grouped as `+CC AAA BBB CCCC`, formatting only the digits
/// typed so far. Anything else, including numbers longer than the country's
/// plan allows, is returned unchanged apart from trimming.
pub fn format_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with('+') {
        return trimmed.to_string();
    }

    let digits: String = trimmed.chars().filter(|ch| ch.is_ascii_digit()).collect();
    let Some((code, groups)) = COUNTRY_GROUPS
        .iter()
        .find(|(code, _)| digits.starts_with(code))
    else {
        return format!("+{digits}");
    };

    let national = &digits[code.len()..];
    let capacity: usize = groups.iter().sum();
    if national.len() > capacity {
        return format!("+{digits}");
    }

    let mut formatted = format!("+{code}");
    let mut rest = national;
    for size in groups.iter() {
        if rest.is_empty() {
            break;
        }
        let take = (*size).min(rest.len());
        formatted.push(' ');
        formatted.push_str(&rest[..take]);
        rest = &rest[take..];
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::format_phone;

    #[test]
    fn formats_complete_north_american_numbers() {
        assert_eq!(format_phone("+14155550123"), "+1 415 555 0123");
        assert_eq!(format_phone("+1 (415) 555-0123"), "+1 415 555 0123");
    }

    #[test]
    fn formats_partial_input_incrementally() {
        assert_eq!(format_phone("+"), "+");
        assert_eq!(format_phone("+1"), "+1");
        assert_eq!(format_phone("+1415"), "+1 415");
        assert_eq!(format_phone("+14155"), "+1 415 5");
        assert_eq!(format_phone("+1415555"), "+1 415 555");
    }

    #[test]
    fn groups_other_known_countries() {
        assert_eq!(format_phone("+442079460958"), "+44 2079 460 958");
        assert_eq!(format_phone("+971501234567"), "+971 50 123 4567");
    }

    #[test]
    fn leaves_national_and_unknown_input_alone() {
        assert_eq!(format_phone("415-555-0123"), "415-555-0123");
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("+999 123"), "+999123");
        assert_eq!(format_phone("+1415555012345"), "+1415555012345");
    }
}
