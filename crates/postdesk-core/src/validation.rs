//! Post draft validation.
//!
//! Runs before any network call. All violations are collected so the editor
//! can show them together.

use std::fmt;

use crate::models::CreatePostRequest;

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 60;
pub const CONTENT_MIN_CHARS: usize = 10;

/// Editor flavour. Only `PublishOnCreate` sends `isPublished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorVariant {
    #[default]
    Standard,
    PublishOnCreate,
}

impl EditorVariant {
    pub fn from_publish_on_create(enabled: bool) -> Self {
        if enabled {
            Self::PublishOnCreate
        } else {
            Self::Standard
        }
    }
}

/// Form input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Content,
    ImageUrl,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Title => write!(f, "title"),
            DraftField::Content => write!(f, "content"),
            DraftField::ImageUrl => write!(f, "imageUrl"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

/// Every violation found in a draft, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: DraftField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }

    pub fn for_field(&self, field: DraftField) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.messages().collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Replaces each newline with the two characters `\` and `n`.
pub fn escape_newlines(content: &str) -> String {
    content.replace('\n', "\\n")
}

/// Turns stored `\n` sequences back into newlines for display.
pub fn unescape_newlines(content: &str) -> String {
    content.replace("\\n", "\n")
}

/// Checks a draft and builds the creation request.
///
/// # Errors
/// Returns every violation when the draft is invalid.
pub fn validate(
    draft: &PostDraft,
    variant: EditorVariant,
) -> Result<CreatePostRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title_len = draft.title.chars().count();
    if title_len < TITLE_MIN_CHARS {
        errors.push(
            DraftField::Title,
            format!("Post titles must be at least {TITLE_MIN_CHARS} characters long"),
        );
    } else if title_len > TITLE_MAX_CHARS {
        errors.push(
            DraftField::Title,
            format!("Post titles must be at most {TITLE_MAX_CHARS} characters long"),
        );
    }

    if draft.content.chars().count() < CONTENT_MIN_CHARS {
        errors.push(
            DraftField::Content,
            format!("Post content must be at least {CONTENT_MIN_CHARS} characters long"),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let is_published = match variant {
        EditorVariant::Standard => None,
        EditorVariant::PublishOnCreate => Some(draft.is_published.unwrap_or(false)),
    };

    Ok(CreatePostRequest {
        title: draft.title.clone(),
        content: escape_newlines(&draft.content),
        image_url: draft.image_url.clone(),
        is_published,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: content.to_string(),
            ..PostDraft::default()
        }
    }

    #[test]
    fn test_short_title_mentions_minimum() {
        let errors = validate(&draft("abcd", "long enough content"), EditorVariant::Standard)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].field, DraftField::Title);
        assert!(errors.errors[0].message.contains("at least 5"));
    }

    #[test]
    fn test_boundaries_pass() {
        let title = "t".repeat(60);
        let content = "line1\nl100";
        assert_eq!(content.chars().count(), 10);

        let request = validate(&draft(&title, content), EditorVariant::Standard).unwrap();
        assert_eq!(request.title, title);
        assert_eq!(request.content, "line1\\nl100");
        assert!(request.is_published.is_none());
    }

    #[test]
    fn test_title_too_long() {
        let errors =
            validate(&draft(&"t".repeat(61), "0123456789"), EditorVariant::Standard).unwrap_err();
        assert!(errors.errors[0].message.contains("at most 60"));
    }

    #[test]
    fn test_collects_all_errors() {
        let errors = validate(&draft("abc", "short"), EditorVariant::Standard).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field(DraftField::Title).count(), 1);
        assert_eq!(errors.for_field(DraftField::Content).count(), 1);
        assert!(errors.to_string().contains("; "));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Five characters, ten bytes.
        let request = validate(&draft("ÄÖÜßé", "ééééééééééé"), EditorVariant::Standard);
        assert!(request.is_ok());
    }

    #[test]
    fn test_escape_newlines_only_touches_newlines() {
        assert_eq!(escape_newlines("a\nb\n\nc"), "a\\nb\\n\\nc");
        assert_eq!(escape_newlines("tab\tand \\n literal"), "tab\tand \\n literal");
    }

    #[test]
    fn test_unescape_restores_typed_newlines() {
        let typed = "first\n\nsecond";
        assert_eq!(unescape_newlines(&escape_newlines(typed)), typed);
    }

    #[test]
    fn test_publish_on_create_variant_sends_flag() {
        let mut input = draft("A valid title", "0123456789");
        let request = validate(&input, EditorVariant::PublishOnCreate).unwrap();
        assert_eq!(request.is_published, Some(false));

        input.is_published = Some(true);
        let request = validate(&input, EditorVariant::PublishOnCreate).unwrap();
        assert_eq!(request.is_published, Some(true));

        let request = validate(&input, EditorVariant::Standard).unwrap();
        assert_eq!(request.is_published, None);
    }
}
