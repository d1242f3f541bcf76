//! HTTP API handlers

pub mod blog;
pub mod comments;
pub mod contact;
pub mod episodes;
pub mod health;
pub mod spotify;
pub mod subscribe;
pub mod summary;

/// Syntactic email check used by subscribe and contact validation.
///
/// Deliberately loose: one `@` with a non-empty local part and a dotted
/// domain, no whitespace. Deliverability is not our problem.
pub(crate) fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
