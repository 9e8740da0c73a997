//! Movetext tokenizer.
//!
//! Reduces a raw PGN-style movetext line to the bare SAN tokens the replay
//! consumes. Move numbers, `{}`/`;` comments, `()` variations, NAGs and
//! `!`/`?` glyphs are dropped; a result token ends the movetext.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Movetext {
    pub sans: Vec<String>,
    pub result: Option<String>,
}

pub fn parse_movetext(text: &str) -> Movetext {
    let mut movetext = Movetext::default();
    let stripped = strip_comments_and_variations(text);

    for raw in stripped.split_whitespace() {
        let token = strip_move_number(raw);
        if token.is_empty() || token.starts_with('$') {
            continue;
        }

        let cleaned = trim_annotation_glyphs(token);
        if is_result_token(cleaned) {
            movetext.result = Some(cleaned.to_owned());
            break;
        }
        if !cleaned.is_empty() {
            movetext.sans.push(cleaned.to_owned());
        }
    }

    movetext
}

#[inline]
pub fn san_tokens(text: &str) -> Vec<String> {
    parse_movetext(text).sans
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut in_line_comment = false;

    for ch in text.chars() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(' ');
            }
            continue;
        }
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => {
                brace_depth = brace_depth.saturating_sub(1);
                out.push(' ');
            }
            '(' if brace_depth == 0 => paren_depth = paren_depth.saturating_add(1),
            ')' if brace_depth == 0 => {
                paren_depth = paren_depth.saturating_sub(1);
                out.push(' ');
            }
            ';' if brace_depth == 0 && paren_depth == 0 => in_line_comment = true,
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.`, `12...` and glued forms like `12.e4` / `12...e5`.
fn strip_move_number(token: &str) -> &str {
    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return token;
    }

    let rest = &token[digits..];
    if rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

fn trim_annotation_glyphs(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

#[cfg(test)]
mod tests {
    use super::{parse_movetext, san_tokens};

    #[test]
    fn strips_numbers_comments_and_glyphs() {
        let text = "1. e4 {best by test} e5 2.Nf3 Nc6?! (2... d6 3. d4) 3. Bb5 $1 a6!! 4...Nf6 1-0";
        let parsed = parse_movetext(text);

        assert_eq!(parsed.sans, ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Nf6"]);
        assert_eq!(parsed.result.as_deref(), Some("1-0"));
    }

    #[test]
    fn keeps_check_markers_castling_and_null_moves() {
        let tokens = san_tokens("1. e4 e5 2. Qh5 -- 3. Qxf7+ Ke7 4. O-O-O# ; trailing note\n *");
        assert_eq!(tokens, ["e4", "e5", "Qh5", "--", "Qxf7+", "Ke7", "O-O-O#"]);
    }

    #[test]
    fn nested_variations_and_comments() {
        let tokens = san_tokens("1. d4 (1. e4 (1. c4 {english (not this)}) e5) d5 {a {nested} note} 2. c4");
        assert_eq!(tokens, ["d4", "d5", "c4"]);
    }

    #[test]
    fn empty_movetext_has_no_tokens() {
        let parsed = parse_movetext("  ");
        assert!(parsed.sans.is_empty());
        assert_eq!(parsed.result, None);
        assert_eq!(parse_movetext("*").result.as_deref(), Some("*"));
    }
}
