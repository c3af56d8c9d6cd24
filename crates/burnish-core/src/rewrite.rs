use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Marker that distinguishes a block reference from a heading reference:
/// `#` followed by U+2023 TRIANGULAR BULLET.
pub const BLOCK_MARKER: &str = "#‣";

const MIN_IDENTIFIER_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub count: usize,
}

fn block_link_regex() -> &'static Regex {
    static BLOCK_LINK: OnceLock<Regex> = OnceLock::new();
    BLOCK_LINK.get_or_init(|| {
        // The body classes exclude `|`, so a link that already carries an
        // alias can never match. Newlines are excluded so a link never spans
        // lines even in whole-document passes.
        Regex::new(r"\[\[([^|\]\n]+?#‣[^|\]\n]+?)\]\]").expect("invalid block link regex")
    })
}

/// Trailing run of 4+ uppercase letters or digits after the last `#‣` in the
/// link body, if any.
fn block_identifier(body: &str) -> Option<&str> {
    let tail_start = body.rfind(BLOCK_MARKER)? + BLOCK_MARKER.len();
    let tail = &body[tail_start..];
    let run = tail
        .chars()
        .rev()
        .take_while(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
        .count();
    if run >= MIN_IDENTIFIER_LEN {
        Some(&tail[tail.len() - run..])
    } else {
        None
    }
}

fn rewrite_text(text: &str) -> Rewrite {
    if !text.contains(BLOCK_MARKER) {
        return Rewrite {
            text: text.to_string(),
            count: 0,
        };
    }
    let mut count = 0;
    let rewritten = block_link_regex().replace_all(text, |caps: &Captures| {
        let body = &caps[1];
        match block_identifier(body) {
            Some(identifier) => {
                count += 1;
                format!(" - [[{body}|{identifier}]]")
            }
            None => caps[0].to_string(),
        }
    });
    Rewrite {
        text: rewritten.into_owned(),
        count,
    }
}

/// Rewrites every unaliased block-reference wikilink on a single line into
/// the dashed, aliased form: `[[target#‣anchor IDENT]]` becomes
/// ` - [[target#‣anchor IDENT|IDENT]]`. Returns the new line and the number
/// of substitutions. Any input that does not qualify comes back unchanged
/// with a count of zero; this never fails.
pub fn rewrite_line(line: &str) -> Rewrite {
    rewrite_text(line)
}

/// Same transformation applied across a whole document in one pass. A link
/// body never matches across a newline, so the result agrees with rewriting
/// each line individually.
pub fn rewrite_document(text: &str) -> Rewrite {
    rewrite_text(text)
}
