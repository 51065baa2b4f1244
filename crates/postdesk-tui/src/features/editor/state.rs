use postdesk_core::validation::{EditorVariant, PostDraft, ValidationErrors};

use crate::common::{MountId, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    ImageUrl,
    Content,
    Published,
}

impl EditorField {
    pub fn label(self) -> &'static str {
        match self {
            EditorField::Title => "Title",
            EditorField::ImageUrl => "Image URL",
            EditorField::Content => "Content",
            EditorField::Published => "Published",
        }
    }
}

#[derive(Debug)]
pub struct EditorState {
    pub mount: MountId,
    pub variant: EditorVariant,
    pub title: TextField,
    pub image_url: TextField,
    pub content: TextField,
    pub is_published: bool,
    pub focus: EditorField,
    /// Violations from the last submit attempt.
    pub errors: ValidationErrors,
    /// A create request is in flight.
    pub submitting: bool,
}

impl EditorState {
    pub fn new(mount: MountId, variant: EditorVariant) -> Self {
        Self {
            mount,
            variant,
            title: TextField::single_line(),
            image_url: TextField::single_line(),
            content: TextField::multi_line(),
            is_published: false,
            focus: EditorField::Title,
            errors: ValidationErrors::default(),
            submitting: false,
        }
    }

    /// Focus order; `Published` only exists in the publish-on-create variant.
    pub fn fields(&self) -> &'static [EditorField] {
        match self.variant {
            EditorVariant::Standard => &[
                EditorField::Title,
                EditorField::ImageUrl,
                EditorField::Content,
            ],
            EditorVariant::PublishOnCreate => &[
                EditorField::Title,
                EditorField::ImageUrl,
                EditorField::Content,
                EditorField::Published,
            ],
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + fields.len() - 1) % fields.len()];
    }

    pub fn focused_text_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            EditorField::Title => Some(&mut self.title),
            EditorField::ImageUrl => Some(&mut self.image_url),
            EditorField::Content => Some(&mut self.content),
            EditorField::Published => None,
        }
    }

    pub fn draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.value().to_string(),
            content: self.content.value().to_string(),
            image_url: self.image_url.value().to_string(),
            is_published: (self.variant == EditorVariant::PublishOnCreate)
                .then_some(self.is_published),
        }
    }

    /// Empties every input and the error list.
    pub fn clear_form(&mut self) {
        self.title.clear();
        self.image_url.clear();
        self.content.clear();
        self.is_published = false;
        self.focus = EditorField::Title;
        self.errors = ValidationErrors::default();
    }
}
