use crate::error::{CoreError, CoreResult};

/// Split one line of the recording sheet into fields.
///
/// Comma separated with RFC 4180 quoting. Structural quote errors (unterminated
/// quoted field, stray quote in an unquoted field, text after a closing quote)
/// make the whole line malformed.
pub fn parse_record(line: &str) -> CoreResult<Vec<String>> {
    if line.is_empty() {
        return Err(CoreError::MalformedRecord("empty line".to_string()));
    }
    check_quotes(line)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let record = rdr
        .records()
        .next()
        .ok_or_else(|| CoreError::MalformedRecord("no fields".to_string()))??;
    Ok(record.iter().map(|f| f.to_string()).collect())
}

fn check_quotes(line: &str) -> CoreResult<()> {
    let mut chars = line.chars().peekable();
    let mut field_start = true;
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                match chars.peek() {
                    Some('"') => {
                        chars.next();
                    }
                    Some(',') | None => in_quotes = false,
                    Some(_) => {
                        return Err(CoreError::MalformedRecord(
                            "text after closing quote".to_string(),
                        ))
                    }
                }
            }
            continue;
        }
        match c {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            '"' => {
                return Err(CoreError::MalformedRecord(
                    "quote inside unquoted field".to_string(),
                ))
            }
            ',' => field_start = true,
            _ => field_start = false,
        }
    }

    if in_quotes {
        return Err(CoreError::MalformedRecord(
            "unterminated quoted field".to_string(),
        ));
    }
    Ok(())
}
