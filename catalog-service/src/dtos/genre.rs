use serde::Deserialize;
use validator::{Validate, ValidationErrors};

pub const NAME_TOO_SHORT: &str = "Genre name must contain at least 3 characters";

/// Raw body of the genre create form.
#[derive(Debug, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

/// Body of the genre delete confirmation form.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteGenreForm {
    #[serde(default)]
    pub genreid: String,
}

#[derive(Debug, Validate)]
struct GenreInput {
    #[validate(length(min = 3, message = "Genre name must contain at least 3 characters"))]
    name: String,
}

/// Result of running the create form through trim, length check and escape.
///
/// `name` is always the sanitized value, even when `errors` is non-empty, so
/// the form can be repopulated with it.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedGenre {
    pub name: String,
    pub errors: Vec<String>,
}

impl SanitizedGenre {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl GenreForm {
    pub fn sanitize(&self) -> SanitizedGenre {
        let input = GenreInput {
            name: trim_name(&self.name).to_string(),
        };

        let errors = match input.validate() {
            Ok(()) => Vec::new(),
            Err(e) => error_messages(&e),
        };

        SanitizedGenre {
            name: escape_html(&input.name),
            errors,
        }
    }
}

// `char::is_whitespace` leaves out the byte order mark, which browsers
// and the JS `trim` treat as whitespace.
fn trim_name(name: &str) -> &str {
    name.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .collect()
}

/// Replace HTML-significant characters with entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}
