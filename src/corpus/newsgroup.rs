// Newsgroup post cleaning.
//
// Raw posts carry metadata that leaks the label (headers name the group,
// signatures repeat per author, quoted replies duplicate other posts). These
// helpers strip it so the statistics reflect the body text only.

/// Attribution and quote markers. A line containing any of these is dropped.
const QUOTE_MARKERS: [&str; 5] = ["writes in", "writes:", "wrote:", "says:", "said:"];
const QUOTE_PREFIXES: [&str; 4] = ["In article", "Quoted from", "|", ">"];

/// Remove everything up to and including the first blank line.
///
/// A post without a blank line is all header.
pub fn strip_header(text: &str) -> &str {
    match text.split_once("\n\n") {
        Some((_, body)) => body,
        None => "",
    }
}

/// Remove the signature block.
///
/// Everything after the last line that is empty or made only of dashes is
/// treated as the signature. If that line is the first line, the text is
/// left alone.
pub fn strip_footer(text: &str) -> String {
    let lines: Vec<&str> = text.trim().split('\n').collect();
    let separator = lines
        .iter()
        .rposition(|line| line.trim().trim_matches('-').is_empty());

    match separator {
        Some(idx) if idx > 0 => lines[..idx].join("\n"),
        _ => text.to_string(),
    }
}

/// Remove quoted reply lines and their attribution lines.
pub fn strip_quoting(text: &str) -> String {
    text.split('\n')
        .filter(|line| !is_quote_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_quote_line(line: &str) -> bool {
    QUOTE_MARKERS.iter().any(|m| line.contains(m))
        || QUOTE_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Apply all cleaning steps: header, then footer, then quoting.
pub fn clean_post(raw: &str) -> String {
    let body = strip_header(raw);
    let body = strip_footer(body);
    strip_quoting(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "From: fan@example.com\n\
        Subject: Re: playoffs\n\
        \n\
        In article <1@x> someone writes:\n\
        > the refs were awful\n\
        The goalie made a great save.\n\
        What a game.\n\
        --\n\
        Fan Name, Somewhere";

    #[test]
    fn header_is_removed() {
        assert!(strip_header(POST).starts_with("In article"));
        assert_eq!(strip_header("no blank line here"), "");
    }

    #[test]
    fn signature_is_removed() {
        let cleaned = strip_footer(strip_header(POST));
        assert!(!cleaned.contains("Fan Name"));
        assert!(cleaned.contains("What a game."));
    }

    #[test]
    fn quoted_lines_are_removed() {
        let cleaned = strip_quoting("In article <1@x> someone writes:\n> quoted\n| piped\nkept");
        assert_eq!(cleaned, "kept");
    }

    #[test]
    fn clean_post_keeps_only_body_text() {
        let cleaned = clean_post(POST);
        assert_eq!(cleaned, "The goalie made a great save.\nWhat a game.");
    }
}
