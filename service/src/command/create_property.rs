//! [`Command`] for creating a new [`Property`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property, user, Property, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// ID of the landlord [`User`] owning a new [`Property`].
    pub landlord_id: user::Id,

    /// [`property::Title`] of a new [`Property`].
    pub title: property::Title,

    /// [`property::Description`] of a new [`Property`].
    pub description: Option<property::Description>,

    /// First [`property::AddressLine`] of a new [`Property`].
    pub address_line1: property::AddressLine,

    /// Second [`property::AddressLine`] of a new [`Property`].
    pub address_line2: Option<property::AddressLine>,

    /// [`property::City`] of a new [`Property`].
    pub city: property::City,

    /// [`property::District`] of a new [`Property`].
    pub district: property::District,

    /// [`property::PostalCode`] of a new [`Property`].
    pub postal_code: Option<property::PostalCode>,

    /// [`property::Kind`] of a new [`Property`].
    pub kind: property::Kind,

    /// [`property::Area`] of a new [`Property`].
    pub area: property::Area,

    /// Number of bedrooms in a new [`Property`].
    pub bedrooms: property::RoomCount,

    /// Number of bathrooms in a new [`Property`].
    pub bathrooms: property::RoomCount,

    /// Monthly rent of a new [`Property`].
    pub rent_price_monthly: property::Price,

    /// Deposit required for renting a new [`Property`].
    pub deposit_amount: property::Price,

    /// Initial [`property::Status`] of a new [`Property`].
    ///
    /// [`property::Status::Vacant`] if [`None`].
    pub status: Option<property::Status>,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<property::Draft>,
            Ok = property::Id,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(landlord_id = %cmd.landlord_id))]
    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
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
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid the landlord being deleted concurrently.
        tx.execute(Lock(By::<User, _>::new(landlord_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let landlord = tx
            .execute(Select(By::<Option<User>, _>::new(landlord_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !landlord.as_ref().is_some_and(User::can_own_properties) {
            return Err(tracerr::new!(E::InvalidLandlord(landlord_id)));
        }

        let now = DateTime::now();
        let draft = property::Draft {
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
            status: status.unwrap_or_default(),
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let id = tx
            .execute(Insert(draft.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Property(id: {id})` created");

        Ok(draft.into_property(id))
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Landlord [`User`] doesn't exist, is deleted or its [`user::Role`]
    /// doesn't allow owning a [`Property`].
    #[display("`User(id: {_0})` does not exist or cannot own properties")]
    #[from(ignore)]
    InvalidLandlord(#[error(not(source))] user::Id),
}
