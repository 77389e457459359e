//! Filesystem-safe slugs for article documents

/// Longest slug in UTF-8 bytes, leaving room for `.md`/`.jpg` within the
/// usual 255-byte file name limit
pub const MAX_SLUG_BYTES: usize = 250;

/// Whether a character may appear in a slug unchanged
fn is_safe(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

/// Derive a slug from a title
///
/// Every character outside word characters and `-` becomes `_`, then the result
/// is cut to `max_len` characters and to at most [`MAX_SLUG_BYTES`] bytes, never
/// splitting a character.
pub fn slugify(title: &str, max_len: usize) -> String {
    let mut slug = String::new();
    for ch in title
        .chars()
        .map(|ch| if is_safe(ch) { ch } else { '_' })
        .take(max_len)
    {
        if slug.len() + ch.len_utf8() > MAX_SLUG_BYTES {
            break;
        }
        slug.push(ch);
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsafe_characters_replaced() {
        let slug = slugify("Intro: MinIO/S3 Guide?", 250);

        assert_eq!(slug, "Intro__MinIO_S3_Guide_");
        for forbidden in ['/', ':', '?', ' '] {
            assert!(!slug.contains(forbidden));
        }
    }

    #[test]
    fn test_spaces_and_hyphens() {
        assert_eq!(slugify("New Post", 250), "New_Post");
        assert_eq!(slugify("zero-copy reads", 250), "zero-copy_reads");
    }

    #[test]
    fn test_truncated_to_max_len() {
        let title = "a".repeat(400);
        assert_eq!(slugify(&title, 250).chars().count(), 250);
    }

    #[test]
    fn test_multibyte_title_fits_file_name_limit() {
        let title = "é".repeat(200);
        let slug = slugify(&title, 250);

        assert_eq!(slug.chars().count(), 125);
        assert_eq!(slug.len(), 250);
        assert!(slug.len() + ".md".len() <= 255);

        // Odd byte budget: a 3-byte char that does not fit is dropped whole
        let slug = slugify(&format!("ab{}", "€".repeat(100)), 250);
        assert_eq!(slug.len(), 248);
        assert!(slug.ends_with('€'));
    }

    #[test]
    fn test_non_ascii_letters_kept() {
        assert_eq!(slugify("Café über", 250), "Café_über");
    }
}
