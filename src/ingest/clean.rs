//! Boilerplate removal for extracted article text

/// Drop share/follow/navigation runs from `text`
///
/// A non-blank line containing any of `markers` starts a boilerplate run, and
/// every line is suppressed until the next blank line. Blank lines always end a
/// run and are kept as paragraph breaks, with consecutive ones collapsed.
pub fn strip_boilerplate(text: &str, markers: &[String]) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_run = false;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            in_run = false;
            if out.last().is_some_and(|last| !last.is_empty()) {
                out.push("");
            }
            continue;
        }

        if markers.iter().any(|marker| trimmed.contains(marker.as_str())) {
            in_run = true;
        }
        if !in_run {
            out.push(line);
        }
    }

    while out.last().is_some_and(|last| last.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        vec!["Share this".to_string(), "Follow us".to_string()]
    }

    #[test]
    fn test_run_ends_at_blank_line() {
        let text = "Intro paragraph.\n\nShare this post\nTwitter\nLinkedIn\n\nBody paragraph.";
        assert_eq!(
            strip_boilerplate(text, &markers()),
            "Intro paragraph.\n\nBody paragraph."
        );
    }

    #[test]
    fn test_lines_before_marker_in_same_block_are_kept() {
        let text = "Thanks for reading.\nFollow us on social\nMastodon\n\nThe end.";
        assert_eq!(
            strip_boilerplate(text, &markers()),
            "Thanks for reading.\n\nThe end."
        );
    }

    #[test]
    fn test_paragraph_breaks_preserved() {
        let text = "One.\n\n\n\nTwo.\nStill two.\n\nThree.";
        assert_eq!(
            strip_boilerplate(text, &markers()),
            "One.\n\nTwo.\nStill two.\n\nThree."
        );
    }

    #[test]
    fn test_no_markers_is_identity_modulo_blank_runs() {
        let text = "Plain text\n\nwith paragraphs";
        assert_eq!(strip_boilerplate(text, &[]), text);
    }

    #[test]
    fn test_leading_boilerplate_leaves_no_leading_blank() {
        let text = "Share this\n\nContent.";
        assert_eq!(strip_boilerplate(text, &markers()), "Content.");
    }
}
