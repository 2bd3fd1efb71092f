//! Placeholder translation.
//!
//! Callers write `?` for every backend. PostgreSQL expects `$1, $2, ...`,
//! so statements are rewritten before they are prepared. Question marks
//! inside string literals, quoted identifiers, dollar-quoted strings and
//! `--` or `/* */` comments are left alone.

/// Rewrite `?` placeholders into numbered `$n` parameters.
///
/// Returns the rewritten SQL and the number of placeholders found.
pub fn translate_placeholders(sql: &str) -> (String, usize) {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut count = 0;
    let mut rest = sql;

    while let Some(c) = rest.chars().next() {
        let skip = match c {
            // A doubled quote re-enters the literal on the next pass.
            '\'' | '"' => rest[1..].find(c).map_or(rest.len(), |i| i + 2),
            '-' if rest.starts_with("--") => rest.find('\n').map_or(rest.len(), |i| i + 1),
            '/' if rest.starts_with("/*") => block_comment_len(rest),
            '$' => dollar_quoted_len(rest).unwrap_or(1),
            '?' => {
                count += 1;
                out.push('$');
                out.push_str(&count.to_string());
                rest = &rest[1..];
                continue;
            }
            _ => c.len_utf8(),
        };

        out.push_str(&rest[..skip]);
        rest = &rest[skip..];
    }

    (out, count)
}

/// Length of the `/* */` comment at the start of `sql`, honouring nesting.
fn block_comment_len(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }

    sql.len()
}

/// Length of the `$tag$ ... $tag$` string at the start of `sql`, or `None`
/// when `sql` does not open one.
fn dollar_quoted_len(sql: &str) -> Option<usize> {
    let body = &sql[1..];
    let tag_len = body.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))?;
    if !body[tag_len..].starts_with('$') || body.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let delimiter = &sql[..tag_len + 2];
    let content = &sql[delimiter.len()..];
    Some(
        content
            .find(delimiter)
            .map_or(sql.len(), |i| delimiter.len() + i + delimiter.len()),
    )
}
