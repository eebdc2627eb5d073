//! Who is operating the console.
//!
//! Authentication is stubbed: the configured operator name decides whether
//! requests run as that operator or anonymously.

/// An authenticated console operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Display name.
    pub name: String,
}

impl Operator {
    /// Initials shown in the user badge (at most two letters).
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Session context passed to every page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionContext {
    #[default]
    Anonymous,
    Authenticated(Operator),
}

impl SessionContext {
    /// Context for a configured operator name; `None` or blank is anonymous.
    #[must_use]
    pub fn from_operator_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => Self::Authenticated(Operator {
                name: name.to_string(),
            }),
            _ => Self::Anonymous,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub const fn operator(&self) -> Option<&Operator> {
        match self {
            Self::Authenticated(operator) => Some(operator),
            Self::Anonymous => None,
        }
    }

    /// Operator name, or an empty string when anonymous.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.operator().map_or("", |operator| operator.name.as_str())
    }

    /// Operator initials, or an empty string when anonymous.
    #[must_use]
    pub fn initials(&self) -> String {
        self.operator().map(Operator::initials).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_operator_name() {
        let session = SessionContext::from_operator_name(Some("Admin User"));
        assert!(session.is_authenticated());
        assert_eq!(session.display_name(), "Admin User");
        assert_eq!(session.initials(), "AU");

        assert_eq!(SessionContext::from_operator_name(Some("  ")), SessionContext::Anonymous);
        assert_eq!(SessionContext::from_operator_name(None), SessionContext::Anonymous);
    }

    #[test]
    fn test_anonymous_has_no_identity() {
        let session = SessionContext::Anonymous;
        assert!(!session.is_authenticated());
        assert_eq!(session.display_name(), "");
        assert_eq!(session.initials(), "");
    }

    #[test]
    fn test_initials_single_word() {
        let operator = Operator {
            name: "teller".to_string(),
        };
        assert_eq!(operator.initials(), "T");
    }
}
