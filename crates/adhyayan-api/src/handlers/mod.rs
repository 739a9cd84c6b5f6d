pub mod admin;
pub mod auth;
pub mod browse;
pub mod catalog;
pub mod content;
pub mod forum;
pub mod leaderboard;
pub mod search;
pub mod users;

use adhyayan_core::models::ContentType;
use adhyayan_core::AppError;

/// Parse an optional `type` query parameter.
pub(crate) fn parse_content_type(value: Option<&str>) -> Result<Option<ContentType>, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.parse::<ContentType>())
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Trim an optional string, mapping blank to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_type() {
        assert_eq!(parse_content_type(None).unwrap(), None);
        assert_eq!(parse_content_type(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_content_type(Some("PYQ")).unwrap(),
            Some(ContentType::Pyq)
        );
        assert!(matches!(
            parse_content_type(Some("podcast")),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  CSE ".to_string())), Some("CSE".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
