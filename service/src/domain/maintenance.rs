//! [`MaintenanceRequest`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::{property, user};
#[cfg(doc)]
use crate::domain::{Property, User};

/// Repair request filed by a tenant [`User`] for a [`Property`].
#[derive(Clone, Debug, PartialEq)]
pub struct MaintenanceRequest {
    /// ID of this [`MaintenanceRequest`].
    pub id: Id,

    /// ID of the [`Property`] needing maintenance.
    pub property_id: property::Id,

    /// ID of the [`User`] who filed this [`MaintenanceRequest`].
    pub tenant_id: user::Id,

    /// [`Title`] of this [`MaintenanceRequest`].
    pub title: Title,

    /// [`Description`] of the problem.
    pub description: Description,

    /// [`Priority`] of this [`MaintenanceRequest`].
    pub priority: Priority,

    /// [`Status`] of this [`MaintenanceRequest`].
    pub status: Status,

    /// [`DateTime`] when this [`MaintenanceRequest`] was filed.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`MaintenanceRequest`] was modified the last
    /// time.
    pub updated_at: UpdateDateTime,
}

impl MaintenanceRequest {
    /// Indicates whether this [`MaintenanceRequest`] still awaits work.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(
            self.status,
            Status::Completed | Status::Cancelled | Status::Rejected,
        )
    }
}

/// ID of a [`MaintenanceRequest`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(i32);

define_text! {
    #[doc = "Title of a [`MaintenanceRequest`]."]
    Title(max = 200)
}

define_text! {
    #[doc = "Description of a [`MaintenanceRequest`]."]
    Description(max = usize::MAX, trimmed = false)
}

define_kind! {
    #[doc = "Urgency of a [`MaintenanceRequest`]."]
    enum Priority {
        #[doc = "Can wait."]
        Low = "low",

        #[doc = "Should be handled soon."]
        Medium = "medium",

        #[doc = "Should be handled first."]
        High = "high",

        #[doc = "Requires immediate action."]
        Emergency = "emergency",
    }
}

define_kind! {
    #[doc = "Processing status of a [`MaintenanceRequest`]."]
    enum Status {
        #[doc = "Filed, not reviewed yet."]
        Pending = "pending",

        #[doc = "Accepted by the landlord."]
        Approved = "approved",

        #[doc = "Work is scheduled."]
        Scheduled = "scheduled",

        #[doc = "Work is being done."]
        InProgress = "in_progress",

        #[doc = "Work is done."]
        Completed = "completed",

        #[doc = "Withdrawn by the tenant."]
        Cancelled = "cancelled",

        #[doc = "Declined by the landlord."]
        Rejected = "rejected",
    }
}

/// [`DateTime`] when a [`MaintenanceRequest`] was filed.
pub type CreationDateTime = DateTimeOf<(MaintenanceRequest, unit::Creation)>;

/// [`DateTime`] when a [`MaintenanceRequest`] was modified the last time.
pub type UpdateDateTime = DateTimeOf<(MaintenanceRequest, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::{Description, Priority, Status, Title};

    #[test]
    fn parses_kinds() {
        assert_eq!("emergency".parse::<Priority>(), Ok(Priority::Emergency));
        assert_eq!("in_progress".parse::<Status>(), Ok(Status::InProgress));
        assert!("urgent".parse::<Priority>().is_err());
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn description_keeps_layout() {
        assert!(Description::new("Tap leaks:\n- kitchen\n- bathroom\n").is_some());
        assert!(Description::new("   ").is_none());
        assert!(Title::new("Tap leaks ").is_none());
    }
}
