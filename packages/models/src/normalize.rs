//! Text normalization for accent-insensitive keyword matching.
//!
//! Applied once when an entity is built and once to the query text, so both
//! sides of a keyword comparison use the same folded form.

/// Accented vowels found in the feeds and their unaccented replacements.
const ACCENT_MAP: &[(char, char)] = &[
    ('à', 'a'),
    ('á', 'a'),
    ('é', 'e'),
    ('è', 'e'),
    ('ì', 'i'),
    ('í', 'i'),
    ('ï', 'i'),
    ('ò', 'o'),
    ('ó', 'o'),
    ('ù', 'u'),
    ('ú', 'u'),
];

/// Lower-cases `input` and strips the accents in [`ACCENT_MAP`].
#[must_use]
pub fn normalize_text(input: &str) -> String {
    input.to_lowercase().chars().map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    ACCENT_MAP
        .iter()
        .find(|(accented, _)| *accented == c)
        .map_or(c, |(_, plain)| *plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_accents() {
        assert_eq!(normalize_text("Música al Carrer"), "musica al carrer");
        assert_eq!(normalize_text("CAFÈ DE L'ÒPERA"), "cafe de l'opera");
        assert_eq!(normalize_text("Veïns"), "veins");
    }

    #[test]
    fn leaves_other_characters_alone() {
        assert_eq!(normalize_text("Ñandú 12/03/2017"), "ñandu 12/03/2017");
        assert_eq!(normalize_text(""), "");
    }
}
