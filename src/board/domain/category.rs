//! Category labels used to tag tasks.

use super::{CategoryId, OwnerId, TaskDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty category display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Creates a validated category name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCategoryName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyCategoryName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user-owned task category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
    color: String,
    icon: String,
    owner_id: OwnerId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCategoryData {
    /// Persisted identifier.
    pub id: CategoryId,
    /// Persisted display name.
    pub name: CategoryName,
    /// Persisted color token.
    pub color: String,
    /// Persisted icon token.
    pub icon: String,
    /// Persisted owner.
    pub owner_id: OwnerId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category.
    #[must_use]
    pub fn new(
        name: CategoryName,
        color: impl Into<String>,
        icon: impl Into<String>,
        owner_id: OwnerId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            name,
            color: color.into(),
            icon: icon.into(),
            owner_id,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a category from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCategoryData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            color: data.color,
            icon: data.icon,
            owner_id: data.owner_id,
            created_at: data.created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Returns the color token.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the icon token.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Name, color and icon of a category seeded for every new owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    /// Display name.
    pub name: &'static str,
    /// Color token.
    pub color: &'static str,
    /// Icon token.
    pub icon: &'static str,
}

/// Categories created on an owner's first load.
pub const DEFAULT_CATEGORIES: [DefaultCategory; 5] = [
    DefaultCategory {
        name: "Work",
        color: "#3B82F6",
        icon: "briefcase",
    },
    DefaultCategory {
        name: "Personal",
        color: "#10B981",
        icon: "user",
    },
    DefaultCategory {
        name: "Health",
        color: "#EF4444",
        icon: "heart",
    },
    DefaultCategory {
        name: "Learning",
        color: "#F59E0B",
        icon: "book-open",
    },
    DefaultCategory {
        name: "Shopping",
        color: "#a13c87",
        icon: "shopping-cart",
    },
];

/// Builds the default category set for an owner.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptyCategoryName`] only if a default name is
/// blank, which the built-in set never is.
pub fn default_categories_for(
    owner_id: OwnerId,
    clock: &impl Clock,
) -> Result<Vec<Category>, TaskDomainError> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|default| {
            let name = CategoryName::new(default.name)?;
            Ok(Category::new(
                name,
                default.color,
                default.icon,
                owner_id,
                clock,
            ))
        })
        .collect()
}
