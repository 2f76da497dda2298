//! [`Property`] definitions.

pub mod media;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::{Amenity, Lease, MaintenanceRequest, User};
use crate::domain::user;

pub use self::media::Media;

/// Rentable unit owned by a landlord [`User`].
///
/// [`Media`], [`Amenity`], [`Lease`] and [`MaintenanceRequest`] records refer
/// to a [`Property`] by its [`Id`] and are fetched on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// ID of the [`User`] owning this [`Property`].
    pub landlord_id: user::Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Description`] of this [`Property`], if any.
    pub description: Option<Description>,

    /// First [`AddressLine`] of this [`Property`].
    pub address_line1: AddressLine,

    /// Second [`AddressLine`] of this [`Property`], if any.
    pub address_line2: Option<AddressLine>,

    /// [`City`] this [`Property`] is located in.
    pub city: City,

    /// [`District`] this [`Property`] is located in.
    pub district: District,

    /// [`PostalCode`] of this [`Property`], if any.
    pub postal_code: Option<PostalCode>,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// [`Area`] of this [`Property`].
    pub area: Area,

    /// Number of bedrooms in this [`Property`].
    pub bedrooms: RoomCount,

    /// Number of bathrooms in this [`Property`].
    pub bathrooms: RoomCount,

    /// Monthly rent of this [`Property`].
    pub rent_price_monthly: Price,

    /// Deposit required for renting this [`Property`].
    pub deposit_amount: Price,

    /// [`Status`] of this [`Property`].
    pub status: Status,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was modified the last time.
    pub updated_at: UpdateDateTime,

    /// [`DateTime`] when this [`Property`] was logically deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

impl Property {
    /// Indicates whether this [`Property`] is logically deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Marks this [`Property`] as modified right now.
    ///
    /// The new [`UpdateDateTime`] is always strictly later than the previous
    /// one.
    pub fn touch(&mut self) {
        self.updated_at = UpdateDateTime::now_after(self.updated_at);
    }

    /// Logically deletes this [`Property`], leaving its related records
    /// intact.
    ///
    /// Deleting an already deleted [`Property`] stamps it again. Always
    /// returns `true`.
    pub fn soft_delete(&mut self) -> bool {
        self.touch();
        self.deleted_at = Some(self.updated_at.coerce());
        true
    }

    /// Returns URL of the main image of this [`Property`] among the provided
    /// `media`, if there is any.
    ///
    /// The main image is the first (by [`media::Position`], then by
    /// [`media::Id`]) non-deleted [`media::MediaType::Image`] belonging to this
    /// [`Property`]. The order of the provided `media` doesn't matter.
    #[must_use]
    pub fn main_image_url<'m>(&self, media: &'m [Media]) -> Option<&'m media::Url> {
        media::main_image(media.iter().filter(|m| m.property_id == self.id))
            .map(|m| &m.url)
    }
}

/// [`Property`] that is not persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    /// ID of the [`User`] owning the [`Property`].
    pub landlord_id: user::Id,

    /// [`Title`] of the [`Property`].
    pub title: Title,

    /// [`Description`] of the [`Property`], if any.
    pub description: Option<Description>,

    /// First [`AddressLine`] of the [`Property`].
    pub address_line1: AddressLine,

    /// Second [`AddressLine`] of the [`Property`], if any.
    pub address_line2: Option<AddressLine>,

    /// [`City`] the [`Property`] is located in.
    pub city: City,

    /// [`District`] the [`Property`] is located in.
    pub district: District,

    /// [`PostalCode`] of the [`Property`], if any.
    pub postal_code: Option<PostalCode>,

    /// [`Kind`] of the [`Property`].
    pub kind: Kind,

    /// [`Area`] of the [`Property`].
    pub area: Area,

    /// Number of bedrooms in the [`Property`].
    pub bedrooms: RoomCount,

    /// Number of bathrooms in the [`Property`].
    pub bathrooms: RoomCount,

    /// Monthly rent of the [`Property`].
    pub rent_price_monthly: Price,

    /// Deposit required for renting the [`Property`].
    pub deposit_amount: Price,

    /// [`Status`] of the [`Property`].
    pub status: Status,

    /// [`DateTime`] when the [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when the [`Property`] was modified the last time.
    pub updated_at: UpdateDateTime,
}

impl Draft {
    /// Turns this [`Draft`] into a [`Property`] persisted under the provided
    /// [`Id`].
    #[must_use]
    pub fn into_property(self, id: Id) -> Property {
        let Self {
            landlord_id,
            title,
            description,
            address_line1,
            address_line2,
            city,
            district,
            postal_code,
            kind,
            area,
            bedrooms,
            bathrooms,
            rent_price_monthly,
            deposit_amount,
            status,
            created_at,
            updated_at,
        } = self;

        Property {
            id,
            landlord_id,
            title,
            description,
            address_line1,
            address_line2,
            city,
            district,
            postal_code,
            kind,
            area,
            bedrooms,
            bathrooms,
            rent_price_monthly,
            deposit_amount,
            status,
            created_at,
            updated_at,
            deleted_at: None,
        }
    }
}

/// ID of a [`Property`].
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
    #[doc = "Title of a [`Property`] listing."]
    Title(max = 100)
}

define_text! {
    #[doc = "Free-text description of a [`Property`]."]
    Description(max = usize::MAX, trimmed = false)
}

define_text! {
    #[doc = "Line of a [`Property`] street address."]
    AddressLine(max = 255)
}

define_text! {
    #[doc = "City a [`Property`] is located in."]
    City(max = 100)
}

define_text! {
    #[doc = "District (or county) a [`Property`] is located in."]
    District(max = 100)
}

define_text! {
    #[doc = "Postal code of a [`Property`]."]
    PostalCode(max = 20)
}

define_text! {
    #[doc = "Kind of a [`Property`] (apartment, house, studio and so on)."]
    Kind(max = 50)
}

/// Floor area of a [`Property`] in square meters.
#[derive(Clone, Copy, Debug, Display, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Area(f64);

impl Area {
    /// Creates a new [`Area`] if the given `sqm` is a finite positive number.
    #[must_use]
    pub fn new(sqm: f64) -> Option<Self> {
        (sqm.is_finite() && sqm > 0.0).then_some(Self(sqm))
    }

    /// Returns this [`Area`] in square meters.
    #[must_use]
    pub fn sqm(self) -> f64 {
        self.0
    }
}

impl FromStr for Area {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().ok().and_then(Self::new).ok_or("invalid `Area`")
    }
}

/// Number of rooms of some kind in a [`Property`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct RoomCount(i32);

impl RoomCount {
    /// Creates a new [`RoomCount`] if the given `count` is not negative.
    #[must_use]
    pub fn new(count: i32) -> Option<Self> {
        (count >= 0).then_some(Self(count))
    }
}

impl FromStr for RoomCount {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().ok().and_then(Self::new).ok_or("invalid `RoomCount`")
    }
}

/// Amount of money (rent, deposit) in the platform currency.
#[derive(Clone, Copy, Debug, Display, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Price(f64);

impl Price {
    /// Creates a new [`Price`] if the given `amount` is a finite non-negative
    /// number.
    #[must_use]
    pub fn new(amount: f64) -> Option<Self> {
        (amount.is_finite() && amount >= 0.0).then_some(Self(amount))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub fn amount(self) -> f64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().ok().and_then(Self::new).ok_or("invalid `Price`")
    }
}

define_kind! {
    #[doc = "Occupancy status of a [`Property`]."]
    enum Status {
        #[doc = "Free to be rented."]
        Vacant = "vacant",

        #[doc = "Occupied under a lease."]
        Rented = "rented",

        #[doc = "Temporarily unavailable due to maintenance."]
        Maintenance = "maintenance",
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Vacant
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was modified the last time.
pub type UpdateDateTime = DateTimeOf<(Property, unit::Update)>;

/// [`DateTime`] when a [`Property`] was logically deleted.
pub type DeletionDateTime = DateTimeOf<(Property, unit::Deletion)>;
