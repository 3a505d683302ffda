//! Brace-balance scanner for HCL block extraction.
//!
//! Variable bodies may contain nested groups (a `validation {}` sub-block,
//! inline map defaults), so block bodies are delimited by counting brace
//! depth instead of by a fixed regex. Quoted strings and comments are
//! skipped while counting.

/// A labeled top-level block: `keyword "label" ["label"] { body }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub labels: Vec<String>,
    pub body: String,
}

/// Extract every `keyword "label"... { ... }` block from the source.
///
/// Malformed headers and unterminated bodies are skipped, never fatal.
pub fn extract_blocks(source: &str, keyword: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let bytes = source.as_bytes();
    let mut pos = 0;

    while let Some(found) = source[pos..].find(keyword) {
        let start = pos + found;
        pos = start + keyword.len();

        // Keyword must stand alone as an identifier.
        let before_ok = start == 0 || !is_ident_byte(bytes[start - 1]);
        let after_ok = pos >= bytes.len() || !is_ident_byte(bytes[pos]);
        if !before_ok || !after_ok {
            continue;
        }

        let mut cursor = pos;
        let mut labels = Vec::new();
        loop {
            cursor = skip_whitespace(source, cursor);
            match source[cursor..].chars().next() {
                Some('"') => {
                    let Some(end) = source[cursor + 1..].find('"') else {
                        return blocks;
                    };
                    labels.push(source[cursor + 1..cursor + 1 + end].to_string());
                    cursor = cursor + end + 2;
                }
                Some('{') if !labels.is_empty() => {
                    if let Some((body, after)) = scan_body(source, cursor) {
                        blocks.push(Block { labels, body });
                        pos = after;
                    }
                    break;
                }
                _ => break,
            }
        }
    }

    blocks
}

/// Scan a brace-delimited body starting at the opening `{`.
///
/// Returns the body text (braces excluded) and the index just past the
/// closing brace. `None` when the body never closes.
fn scan_body(source: &str, open: usize) -> Option<(String, usize)> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut in_comment = false;
    let mut chars = source[open..].char_indices();

    while let Some((offset, c)) = chars.next() {
        let idx = open + offset;
        if in_comment {
            if c == '\n' {
                in_comment = false;
            }
            continue;
        }
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '#' => in_comment = true,
            '/' if source[idx..].starts_with("//") => in_comment = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((source[open + 1..idx].to_string(), idx + 1));
                }
            }
            _ => {}
        }
    }

    None
}

fn skip_whitespace(source: &str, mut idx: usize) -> usize {
    while idx < source.len() {
        let c = source[idx..].chars().next().unwrap_or('\0');
        if c.is_whitespace() {
            idx += c.len_utf8();
        } else {
            break;
        }
    }
    idx
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}
