//! Wire key resolution for struct fields.
//!
//! Callers pass candidate names in priority order (explicit override first,
//! then any secondary convention); the first present, non-empty candidate
//! wins. Without one, the field identifier is rendered in snake case.

use std::borrow::Cow;

/// Resolve a field's wire key from ordered candidates, falling back to
/// `to_snake_case(ident)`.
pub fn resolve_field_name<'a>(candidates: &[Option<&'a str>], ident: &str) -> Cow<'a, str> {
    candidates
        .iter()
        .flatten()
        .find(|name| !name.is_empty())
        .map(|name| Cow::Borrowed(*name))
        .unwrap_or_else(|| Cow::Owned(to_snake_case(ident)))
}

/// Snake-case rendering of an identifier.
///
/// Acronym runs stay together: `UserID` → `user_id`, `HTTPServer` →
/// `http_server`. Digit runs are words of their own: `Field1` → `field_1`,
/// `address_line1` → `address_line_1`, `V2Beta` → `v_2_beta`.
pub fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == ' ' || c == '.' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let boundary = match prev {
            None => false,
            Some(p) if c.is_ascii_digit() => p.is_alphabetic(),
            Some(p) if p.is_ascii_digit() => c.is_alphabetic(),
            Some(p) if c.is_uppercase() && p.is_lowercase() => true,
            // End of an acronym run: "HTTPServer" splits before 'S'.
            Some(p) if c.is_uppercase() && p.is_uppercase() => {
                next.is_some_and(|n| n.is_lowercase())
            }
            Some(_) => false,
        };
        if boundary && !out.ends_with('_') {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}
