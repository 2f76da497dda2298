//! [`Query`] collection related to a single [`Property`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, media},
        Amenity, Lease, MaintenanceRequest, Property, User,
    },
    infra::{database, Database},
    Service,
};
use super::{DatabaseQuery, Query};

/// Queries a [`Property`] by its [`property::Id`].
///
/// Logically deleted [`Property`] records are returned too.
pub type ById = DatabaseQuery<By<Option<Property>, property::Id>>;

/// Queries the landlord [`User`] of a [`Property`].
pub type Landlord = DatabaseQuery<By<Option<User>, property::Id>>;

/// Queries all the [`media::Media`] of a [`Property`], ordered by
/// [`media::Media::sort_key()`].
pub type Media = DatabaseQuery<By<Vec<media::Media>, property::Id>>;

/// Queries all the [`Amenity`] records of a [`Property`].
pub type Amenities = DatabaseQuery<By<Vec<Amenity>, property::Id>>;

/// Queries all the [`Lease`] records of a [`Property`].
pub type Leases = DatabaseQuery<By<Vec<Lease>, property::Id>>;

/// Queries all the [`MaintenanceRequest`] records of a [`Property`].
pub type MaintenanceRequests =
    DatabaseQuery<By<Vec<MaintenanceRequest>, property::Id>>;

/// Queries URL of the main image of a [`Property`].
///
/// See [`Property::main_image_url()`] for details.
#[derive(Clone, Copy, Debug)]
pub struct MainImageUrl {
    /// ID of the [`Property`] to query the main image of.
    pub property_id: property::Id,
}

impl<Db> Query<MainImageUrl> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<media::Media>, property::Id>>,
            Ok = Vec<media::Media>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<media::Url>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        MainImageUrl { property_id }: MainImageUrl,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(property) = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let media = self
            .database()
            .execute(Select(By::<Vec<media::Media>, _>::new(property_id)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(property.main_image_url(&media).cloned())
    }
}
