//! BibTeX parser implementation using nom
//!
//! Handles standard BibTeX format:
//! - @string definitions
//! - @preamble declarations
//! - @comment sections and % line comments
//! - Braced and quoted field values, including nested braces
//! - String concatenation with #
//!
//! Unlike lenient reference managers, the parser stops at the first
//! malformed block and reports its line number. A file that fails to
//! parse is never partially normalized.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{map, opt},
    IResult,
};

use super::entry::{Database, Entry, EntryKind};

/// Error type for parsing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected an entry type after '@'")]
    EntryType { line: u32 },
    #[error("line {line}: malformed @{kind} block")]
    Block { line: u32, kind: String },
}

/// Parse a BibTeX string into a [`Database`]
pub fn parse(input: &str) -> Result<Database, ParseError> {
    let mut db = Database::default();
    let mut remaining = input;

    loop {
        remaining = skip_to_block(remaining);
        if remaining.is_empty() {
            break;
        }

        // remaining starts with '@'
        let line = line_of(input, remaining);
        let (rest, kind_src) =
            block_type(&remaining[1..]).map_err(|_| ParseError::EntryType { line })?;
        let kind = kind_src.to_lowercase();
        let block_err = |_| ParseError::Block {
            line,
            kind: kind.clone(),
        };

        remaining = match kind.as_str() {
            "string" => {
                let (rest, (name, value)) = string_block(rest, &db).map_err(block_err)?;
                db.strings.push((name, value));
                rest
            }
            "preamble" => {
                let (rest, text) = preamble_block(rest, &db).map_err(block_err)?;
                db.preambles.push(text);
                rest
            }
            "comment" => {
                let (rest, _) = comment_block(rest).map_err(block_err)?;
                rest
            }
            _ => {
                let (rest, entry) = entry_block(rest, kind_src, &db).map_err(block_err)?;
                db.entries.push(entry);
                rest
            }
        };
    }

    Ok(db)
}

/// 1-based line number at the start of `rest` within `input`
fn line_of(input: &str, rest: &str) -> u32 {
    let consumed = input.len() - rest.len();
    input[..consumed].matches('\n').count() as u32 + 1
}

/// Skip whitespace, % line comments, and stray text up to the next '@'
fn skip_to_block(input: &str) -> &str {
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        if let Some(comment) = rest.strip_prefix('%') {
            let end = comment.find('\n').map(|p| p + 1).unwrap_or(comment.len());
            rest = &comment[end..];
            continue;
        }
        break;
    }
    // Text between blocks carries no structure; jump to the next block
    match rest.find('@') {
        Some(pos) => &rest[pos..],
        None => "",
    }
}

/// Parse the block type name after '@'
fn block_type(input: &str) -> IResult<&str, &str> {
    let (rest, _) = multispace0(input)?;
    take_while1(|c: char| c.is_ascii_alphanumeric())(rest)
}

/// Field or @string identifier
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
}

/// Parse a @string definition body: `{name = value}`
fn string_block<'a>(input: &'a str, db: &Database) -> IResult<&'a str, (String, String)> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, name) = identifier(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, value) = field_value(rest, db)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('}')(rest)?;

    Ok((rest, (name.to_string(), value)))
}

/// Parse a @preamble body: `{value}`
fn preamble_block<'a>(input: &'a str, db: &Database) -> IResult<&'a str, String> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, value) = field_value(rest, db)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('}')(rest)?;

    Ok((rest, value))
}

/// Skip a @comment body (braced group, or rest of line)
fn comment_block(input: &str) -> IResult<&str, ()> {
    let (rest, _) = multispace0(input)?;
    if rest.starts_with('{') {
        let (rest, _) = braced_span(rest)?;
        Ok((rest, ()))
    } else {
        let pos = rest.find('\n').unwrap_or(rest.len());
        Ok((&rest[pos..], ()))
    }
}

/// Parse an entry body: `{citekey, name = value, ...}`
fn entry_block<'a>(input: &'a str, kind_src: &str, db: &Database) -> IResult<&'a str, Entry> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, cite_key) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || "_-:./+".contains(c))(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = opt(char(','))(rest)?;
    let (rest, fields) = entry_fields(rest, db)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('}')(rest)?;

    let mut entry = Entry::new(cite_key, EntryKind::from_source(kind_src));
    for (name, value) in fields {
        entry.add_field(name, value);
    }

    Ok((rest, entry))
}

/// Parse all fields within an entry; a malformed field aborts the entry
fn entry_fields<'a>(input: &'a str, db: &Database) -> IResult<&'a str, Vec<(String, String)>> {
    let mut fields = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        if rest.starts_with('}') {
            return Ok((rest, fields));
        }

        let (rest, field) = single_field(rest, db)?;
        fields.push(field);

        let (rest, _) = multispace0(rest)?;
        remaining = rest.strip_prefix(',').unwrap_or(rest);
    }
}

/// Parse one `name = value` pair
fn single_field<'a>(input: &'a str, db: &Database) -> IResult<&'a str, (String, String)> {
    let (rest, name) = identifier(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, value) = field_value(rest, db)?;

    Ok((rest, (name.to_string(), value)))
}

/// Parse a field value: braced, quoted, number, or @string reference,
/// possibly concatenated with #
fn field_value<'a>(input: &'a str, db: &Database) -> IResult<&'a str, String> {
    let mut value = String::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        let (rest, part) = alt((
            braced_value,
            quoted_value,
            map(take_while1(|c: char| c.is_ascii_digit()), |s: &str| {
                s.to_string()
            }),
            map(identifier, |name: &str| {
                // Unknown references stay as their literal name
                db.string(name)
                    .map(str::to_string)
                    .unwrap_or_else(|| name.to_string())
            }),
        ))(rest)?;
        value.push_str(&part);

        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix('#') {
            Some(stripped) => remaining = stripped,
            None => return Ok((rest, value)),
        }
    }
}

/// Parse a braced value `{content}`, stripping the outer braces
fn braced_value(input: &str) -> IResult<&str, String> {
    let (rest, span) = braced_span(input)?;
    Ok((rest, span[1..span.len() - 1].to_string()))
}

/// Match a balanced `{...}` span, honoring nesting and backslash escapes
fn braced_span(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom_error(input));
    }

    let mut depth = 0i32;
    let mut escaped = false;
    for (idx, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[idx + 1..], &input[..idx + 1]));
                }
            }
            _ => {}
        }
    }

    Err(nom_error(input))
}

/// Parse a quoted value `"content"`; braces protect embedded quotes
fn quoted_value(input: &str) -> IResult<&str, String> {
    if !input.starts_with('"') {
        return Err(nom_error(input));
    }

    let mut depth = 0i32;
    let mut escaped = false;
    for (idx, c) in input.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth -= 1,
            '"' if depth == 0 => {
                return Ok((&input[idx + 1..], input[1..idx].to_string()));
            }
            _ => {}
        }
    }

    Err(nom_error(input))
}

fn nom_error(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Char))
}
