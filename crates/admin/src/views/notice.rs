//! Banners shown after a mutation.

/// Operator-facing mutation messages.
pub mod messages {
    pub const CREATED: &str = "Customer created successfully!";
    pub const CREATE_FAILED: &str = "Failed to create customer.";
    pub const CREATE_FULL_FAILED: &str = "Failed to create customer. Age must be 18+";
    pub const DEACTIVATED: &str = "Customer deactivated successfully!";
    pub const DEACTIVATE_FAILED: &str = "Failed to deactivate customer.";
    pub const ALREADY_INACTIVE: &str = "Customer is already inactive.";
    pub const UPDATED: &str = "Customer updated successfully!";
    pub const UPDATE_FAILED: &str = "Failed to update customer.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A success or failure banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, NoticeKind::Success)
    }

    /// CSS-friendly class name.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice-success",
            NoticeKind::Failure => "notice-failure",
        }
    }
}
