use crate::allocator::selection::CREATE_PREFIX;
use crate::errors::AppError;
use crate::models::criterion::NewCriterion;

pub const MISSING_FIELDS_MESSAGE: &str = "Name and description are required.";

/// Cleans up a user-entered criterion before it is sent to the backend.
///
/// - a leading `/` (from the selection box) is dropped
/// - name and description are trimmed and must both be non-empty
/// - the name's first character is upper-cased
pub fn normalize_new_criterion(name: &str, description: &str) -> Result<NewCriterion, AppError> {
    let name = name.trim();
    let name = name.strip_prefix(CREATE_PREFIX).unwrap_or(name).trim();
    let description = description.trim();

    if name.is_empty() || description.is_empty() {
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    Ok(NewCriterion {
        name: capitalize_first(name),
        description: description.to_string(),
    })
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
