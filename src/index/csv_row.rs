//! Minimal CSV for index rows: comma separated, `"` quoting, doubled quotes
//! inside quoted fields. Quoted fields may span lines.

/// Quote `field` if it contains a separator, quote or line break.
fn write_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Encode one row, including the trailing newline.
#[must_use]
pub fn encode_row(fields: &[&str]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_field(&mut out, field);
    }
    out.push('\n');
    out
}

/// A row together with the line it started on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Parse error with the line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

/// Parse a whole document into rows. Blank lines are skipped.
///
/// # Errors
///
/// Returns a [`ParseError`] for an unterminated quoted field or for text
/// directly after a closing quote.
pub fn parse_rows(text: &str) -> Result<Vec<ParsedRow>, ParseError> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut line = 1;
    let mut row_line = 1;
    let mut in_quotes = false;
    let mut after_quote = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            ',' => {
                fields.push(std::mem::take(&mut field));
                after_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                if !(fields.len() == 1 && fields[0].is_empty()) || after_quote {
                    rows.push(ParsedRow {
                        line: row_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                fields.clear();
                after_quote = false;
                line += 1;
                row_line = line;
            }
            '"' if field.is_empty() && !after_quote => in_quotes = true,
            _ if after_quote => {
                return Err(ParseError {
                    line,
                    reason: format!("unexpected {c:?} after closing quote"),
                });
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ParseError {
            line: row_line,
            reason: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !fields.is_empty() || after_quote {
        fields.push(field);
        rows.push(ParsedRow {
            line: row_line,
            fields,
        });
    }
    Ok(rows)
}
