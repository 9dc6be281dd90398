use serde::{Deserialize, Serialize};

/// Raw field values of a waitlist form, exactly as the visitor typed them.
///
/// Owned by the front end and passed by reference into validation and
/// submission. Fields a form variant doesn't render are simply left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    /// Visitor name (coffee drinker forms only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub email: String,

    /// Café name (partner forms only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cafe: Option<String>,

    /// Beta testing / featured launch interest. `None` when the form has no checkbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<bool>,
}

impl FormState {
    pub fn user(email: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn partner(email: impl Into<String>, cafe: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            cafe: Some(cafe.into()),
            ..Self::default()
        }
    }

    /// Trimmed name, `None` when absent or blank.
    pub fn trimmed_name(&self) -> Option<String> {
        trimmed_non_empty(self.name.as_deref())
    }

    /// Trimmed café name, `None` when absent or blank.
    pub fn trimmed_cafe(&self) -> Option<String> {
        trimmed_non_empty(self.cafe.as_deref())
    }

    pub fn trimmed_email(&self) -> String {
        self.email.trim().to_string()
    }
}

fn trimmed_non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
