//! [`Command`] for updating a [`Property`].

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

/// [`Command`] for updating a [`Property`].
///
/// [`None`] fields are left untouched. Optional fields may be cleared by
/// providing `Some(None)`.
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to be updated.
    pub property_id: property::Id,

    /// New [`property::Title`] of the [`Property`].
    pub title: Option<property::Title>,

    /// New [`property::Description`] of the [`Property`].
    pub description: Option<Option<property::Description>>,

    /// New first [`property::AddressLine`] of the [`Property`].
    pub address_line1: Option<property::AddressLine>,

    /// New second [`property::AddressLine`] of the [`Property`].
    pub address_line2: Option<Option<property::AddressLine>>,

    /// New [`property::City`] of the [`Property`].
    pub city: Option<property::City>,

    /// New [`property::District`] of the [`Property`].
    pub district: Option<property::District>,

    /// New [`property::PostalCode`] of the [`Property`].
    pub postal_code: Option<Option<property::PostalCode>>,

    /// New [`property::Kind`] of the [`Property`].
    pub kind: Option<property::Kind>,

    /// New [`property::Area`] of the [`Property`].
    pub area: Option<property::Area>,

    /// New number of bedrooms in the [`Property`].
    pub bedrooms: Option<property::RoomCount>,

    /// New number of bathrooms in the [`Property`].
    pub bathrooms: Option<property::RoomCount>,

    /// New monthly rent of the [`Property`].
    pub rent_price_monthly: Option<property::Price>,

    /// New deposit required for renting the [`Property`].
    pub deposit_amount: Option<property::Price>,

    /// New [`property::Status`] of the [`Property`].
    pub status: Option<property::Status>,
}

impl From<property::Id> for UpdateProperty {
    fn from(property_id: property::Id) -> Self {
        Self {
            property_id,
            title: None,
            description: None,
            address_line1: None,
            address_line2: None,
            city: None,
            district: None,
            postal_code: None,
            kind: None,
            area: None,
            bedrooms: None,
            bathrooms: None,
            rent_price_monthly: None,
            deposit_amount: None,
            status: None,
        }
    }
}

/// Replaces `field` with the `new` value, if it's provided and differs.
///
/// Returns whether the `field` has been changed.
fn apply<T: PartialEq>(field: &mut T, new: Option<T>) -> bool {
    match new {
        Some(new) if *field != new => {
            *field = new;
            true
        }
        Some(_) | None => false,
    }
}

impl<Db> Command<UpdateProperty> for Service<Db>
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
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            property_id,
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
            return Err(tracerr::new!(E::PropertyDeleted(property_id)));
        }

        let changes = [
            apply(&mut property.title, title),
            apply(&mut property.description, description),
            apply(&mut property.address_line1, address_line1),
            apply(&mut property.address_line2, address_line2),
            apply(&mut property.city, city),
            apply(&mut property.district, district),
            apply(&mut property.postal_code, postal_code),
            apply(&mut property.kind, kind),
            apply(&mut property.area, area),
            apply(&mut property.bedrooms, bedrooms),
            apply(&mut property.bathrooms, bathrooms),
            apply(&mut property.rent_price_monthly, rent_price_monthly),
            apply(&mut property.deposit_amount, deposit_amount),
            apply(&mut property.status, status),
        ];
        if !changes.contains(&true) {
            return Ok(property);
        }

        property.touch();
        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Property(id: {property_id})` updated");

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Property`] is logically deleted.
    #[display("`Property(id: {_0})` is deleted")]
    #[from(ignore)]
    PropertyDeleted(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_property, SoftDeleteProperty},
        domain::{property, user},
        Command as _,
    };

    use super::{ExecutionError, UpdateProperty};

    #[tokio::test]
    async fn updates_and_touches() {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let created = svc
            .execute(create_property::spec::command(landlord))
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateProperty {
                status: Some(property::Status::Rented),
                postal_code: Some(property::PostalCode::new("200030")),
                description: Some(None),
                ..UpdateProperty::from(created.id)
            })
            .await
            .unwrap();

        assert_eq!(updated.status, property::Status::Rented);
        assert_eq!(
            updated.postal_code.as_ref().map(AsRef::<str>::as_ref),
            Some("200030"),
        );
        assert_eq!(updated.description, None);
        assert_eq!(updated.title, created.title);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(svc.database().property(created.id), Some(updated));
    }

    #[tokio::test]
    async fn keeps_unchanged_untouched() {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let created = svc
            .execute(create_property::spec::command(landlord))
            .await
            .unwrap();

        let same = svc
            .execute(UpdateProperty {
                title: Some(created.title.clone()),
                ..UpdateProperty::from(created.id)
            })
            .await
            .unwrap();

        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn rejects_deleted_property() {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let created = svc
            .execute(create_property::spec::command(landlord))
            .await
            .unwrap();
        _ = svc
            .execute(SoftDeleteProperty { property_id: created.id })
            .await
            .unwrap();

        let err = svc
            .execute(UpdateProperty {
                status: Some(property::Status::Rented),
                ..UpdateProperty::from(created.id)
            })
            .await
            .unwrap_err();

        assert!(matches!(err.into_inner(), ExecutionError::PropertyDeleted(_)));
    }

    #[tokio::test]
    async fn rejects_unknown_property() {
        let (svc, _) = create_property::spec::service(user::Role::Landlord);

        let err = svc
            .execute(UpdateProperty::from(property::Id::from(5)))
            .await
            .unwrap_err();

        assert!(matches!(err.into_inner(), ExecutionError::PropertyNotExists(_)));
    }
}
