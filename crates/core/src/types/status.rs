//! Status and ordering enums for customer lists.

use serde::{Deserialize, Serialize};

/// Whether a customer account is active.
///
/// Accounts start active and can only move to inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    /// Status derived from the service's `active` flag.
    #[must_use]
    pub const fn from_active(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// CSS-friendly class name.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Field the customer service sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Income,
    Id,
    Email,
}

impl SortField {
    /// Every sort field, in the order the UI offers them.
    pub const ALL: [Self; 4] = [Self::Name, Self::Income, Self::Id, Self::Email];

    /// Query parameter value understood by the customer service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Income => "income",
            Self::Id => "id",
            Self::Email => "email",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Income => "Income",
            Self::Id => "ID",
            Self::Email => "Email",
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "income" => Ok(Self::Income),
            "id" => Ok(Self::Id),
            "email" => Ok(Self::Email),
            _ => Err(format!("invalid sort field: {s}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Both directions, ascending first.
    pub const ALL: [Self; 2] = [Self::Asc, Self::Desc];

    /// Query parameter value understood by the customer service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "Ascending",
            Self::Desc => "Descending",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_active_flag() {
        assert_eq!(CustomerStatus::from_active(true), CustomerStatus::Active);
        assert_eq!(CustomerStatus::from_active(false), CustomerStatus::Inactive);
        assert_eq!(CustomerStatus::Inactive.label(), "Inactive");
    }

    #[test]
    fn test_sort_field_round_trips_through_str() {
        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>(), Ok(field));
        }
        assert!("age".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("DESC".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_defaults_are_name_ascending() {
        assert_eq!(SortField::default(), SortField::Name);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }
}
