//! [`Amenity`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::property;
#[cfg(doc)]
use crate::domain::Property;

/// Feature offered by a [`Property`] (parking, balcony, elevator and so on).
#[derive(Clone, Debug, PartialEq)]
pub struct Amenity {
    /// ID of this [`Amenity`].
    pub id: Id,

    /// ID of the [`Property`] offering this [`Amenity`].
    pub property_id: property::Id,

    /// [`Name`] of this [`Amenity`].
    pub name: Name,

    /// [`DateTime`] when this [`Amenity`] was added.
    pub created_at: CreationDateTime,
}

/// ID of an [`Amenity`].
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
    #[doc = "Name of an [`Amenity`]."]
    Name(max = 100)
}

/// [`DateTime`] when an [`Amenity`] was added.
pub type CreationDateTime = DateTimeOf<(Amenity, unit::Creation)>;
