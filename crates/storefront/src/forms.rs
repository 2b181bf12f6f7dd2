//! Form validation.

use dewdrop_core::Email;

/// What kind of input a field is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
}

/// Validation state shown on the field's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Not checked yet.
    #[default]
    Untouched,
    /// Normal border.
    Valid,
    /// Destructive border.
    Invalid,
}

/// A form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub kind: FieldKind,
    pub state: FieldState,
}

impl FormField {
    /// An optional text field.
    #[must_use]
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            required: false,
            kind: FieldKind::Text,
            state: FieldState::Untouched,
        }
    }

    /// An optional email field.
    #[must_use]
    pub fn email(name: &str, value: &str) -> Self {
        Self {
            kind: FieldKind::Email,
            ..Self::text(name, value)
        }
    }

    /// Mark the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The state this field should have, or `None` if it is not checked.
    fn check(&self) -> Option<FieldState> {
        let value = self.value.trim();
        if self.required && value.is_empty() {
            return Some(FieldState::Invalid);
        }
        if self.kind == FieldKind::Email && !value.is_empty() && Email::parse(value).is_err() {
            return Some(FieldState::Invalid);
        }
        (self.required || self.kind == FieldKind::Email).then_some(FieldState::Valid)
    }
}

/// Validate every field, updating each checked field's state.
///
/// Required fields must be non-blank; email fields with a value must hold
/// a valid address. Optional text fields are left untouched. Returns `true`
/// if no field is invalid.
pub fn validate_form(fields: &mut [FormField]) -> bool {
    let mut valid = true;
    for field in fields.iter_mut() {
        if let Some(state) = field.check() {
            field.state = state;
            if state == FieldState::Invalid {
                valid = false;
            }
        }
    }
    tracing::debug!(valid, fields = fields.len(), "Validated form");
    valid
}
