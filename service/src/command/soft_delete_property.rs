//! [`Command`] for logically deleting a [`Property`].

use common::operations::{By, Commit, Lock, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for logically deleting a [`Property`].
///
/// Media, amenities, leases and maintenance requests of the [`Property`] are
/// left intact.
#[derive(Clone, Copy, Debug, From)]
pub struct SoftDeleteProperty {
    /// ID of the [`Property`] to be deleted.
    pub property_id: property::Id,
}

impl<Db> Command<SoftDeleteProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Property, property::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(property_id = %cmd.property_id))]
    async fn execute(
        &self,
        cmd: SoftDeleteProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SoftDeleteProperty { property_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Property`.
        tx.execute(Lock(By::<Property, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        if property.is_deleted() {
            log::debug!("`Property(id: {property_id})` is deleted already");
        }
        _ = property.soft_delete();

        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Property(id: {property_id})` deleted");

        Ok(property)
    }
}

/// Error of [`SoftDeleteProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::{
        command::create_property,
        domain::{lease, property, user, Lease},
        query, Command as _,
    };

    use super::{ExecutionError, SoftDeleteProperty};

    #[tokio::test]
    async fn deletes_logically() {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let created = svc
            .execute(create_property::spec::command(landlord))
            .await
            .unwrap();

        let deleted = svc
            .execute(SoftDeleteProperty { property_id: created.id })
            .await
            .unwrap();

        assert!(deleted.is_deleted());
        assert_eq!(deleted.deleted_at, Some(deleted.updated_at.coerce()));
        assert!(deleted.updated_at > created.updated_at);
        let stored = svc
            .execute(query::property::ById::by(created.id))
            .await
            .unwrap();
        assert_eq!(stored, Some(deleted));
    }

    #[tokio::test]
    async fn keeps_leases() {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let created = svc
            .execute(create_property::spec::command(landlord))
            .await
            .unwrap();
        let now = DateTime::now();
        svc.database().add_lease(Lease {
            id: lease::Id::from(1),
            property_id: created.id,
            tenant_id: user::Id::from(2),
            status: lease::Status::Active,
            starts_at: now.coerce(),
            ends_at: now.coerce(),
            rent_amount: created.rent_price_monthly,
            deposit_amount: created.deposit_amount,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        });

        _ = svc
            .execute(SoftDeleteProperty { property_id: created.id })
            .await
            .unwrap();

        let leases = svc
            .execute(query::property::Leases::by(created.id))
            .await
            .unwrap();
        assert_eq!(leases.len(), 1);
        assert!(leases[0].is_active());
    }

    #[tokio::test]
    async fn deleting_twice_restamps() {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let created = svc
            .execute(create_property::spec::command(landlord))
            .await
            .unwrap();

        let first = svc
            .execute(SoftDeleteProperty { property_id: created.id })
            .await
            .unwrap();
        let second = svc
            .execute(SoftDeleteProperty { property_id: created.id })
            .await
            .unwrap();

        assert!(second.deleted_at > first.deleted_at);
    }

    #[tokio::test]
    async fn fails_on_unknown_property() {
        let (svc, _) = create_property::spec::service(user::Role::Landlord);

        let err = svc
            .execute(SoftDeleteProperty { property_id: property::Id::from(3) })
            .await
            .unwrap_err();

        assert!(matches!(err.into_inner(), ExecutionError::PropertyNotExists(_)));
    }
}
