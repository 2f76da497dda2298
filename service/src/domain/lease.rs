//! [`Lease`] definitions.

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

/// Rental agreement between a tenant [`User`] and the landlord of a
/// [`Property`].
#[derive(Clone, Debug, PartialEq)]
pub struct Lease {
    /// ID of this [`Lease`].
    pub id: Id,

    /// ID of the leased [`Property`].
    pub property_id: property::Id,

    /// ID of the tenant [`User`].
    pub tenant_id: user::Id,

    /// [`Status`] of this [`Lease`].
    pub status: Status,

    /// [`DateTime`] when this [`Lease`] starts.
    pub starts_at: StartDateTime,

    /// [`DateTime`] when this [`Lease`] ends.
    pub ends_at: EndDateTime,

    /// Monthly rent agreed in this [`Lease`].
    pub rent_amount: property::Price,

    /// Deposit agreed in this [`Lease`].
    pub deposit_amount: property::Price,

    /// [`DateTime`] when this [`Lease`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Lease`] was modified the last time.
    pub updated_at: UpdateDateTime,
}

impl Lease {
    /// Indicates whether this [`Lease`] currently binds its [`Property`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

/// ID of a [`Lease`].
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

define_kind! {
    #[doc = "Lifecycle status of a [`Lease`]."]
    enum Status {
        #[doc = "Being prepared."]
        Draft = "draft",

        #[doc = "Waiting for signatures."]
        PendingSignature = "pending_signature",

        #[doc = "In force."]
        Active = "active",

        #[doc = "Ran out its term."]
        Expired = "expired",

        #[doc = "Ended before its term."]
        Terminated = "terminated",

        #[doc = "Superseded by a renewal."]
        Renewed = "renewed",
    }
}

/// [`DateTime`] when a [`Lease`] starts.
pub type StartDateTime = DateTimeOf<(Lease, Start)>;

/// [`DateTime`] when a [`Lease`] ends.
pub type EndDateTime = DateTimeOf<(Lease, End)>;

/// [`DateTime`] when a [`Lease`] was created.
pub type CreationDateTime = DateTimeOf<(Lease, unit::Creation)>;

/// [`DateTime`] when a [`Lease`] was modified the last time.
pub type UpdateDateTime = DateTimeOf<(Lease, unit::Update)>;

/// Start of a [`Lease`] term.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// End of a [`Lease`] term.
#[derive(Clone, Copy, Debug)]
pub struct End;
