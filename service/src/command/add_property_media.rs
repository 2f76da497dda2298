//! [`Command`] for attaching a new [`Media`] to a [`Property`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        property::{self, media},
        Media, Property,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for attaching a new [`Media`] to a [`Property`].
///
/// The new [`Media`] is placed after all the existing ones.
#[derive(Clone, Debug)]
pub struct AddPropertyMedia {
    /// ID of the [`Property`] to attach the [`Media`] to.
    pub property_id: property::Id,

    /// [`media::MediaType`] of the new [`Media`].
    pub kind: media::MediaType,

    /// [`media::Url`] of the new [`Media`] file.
    pub url: media::Url,
}

impl<Db> Command<AddPropertyMedia> for Service<Db>
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
        > + Database<
            Select<By<Option<media::Position>, property::Id>>,
            Ok = Option<media::Position>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<media::Draft>,
            Ok = media::Id,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Media;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(property_id = %cmd.property_id))]
    async fn execute(
        &self,
        cmd: AddPropertyMedia,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddPropertyMedia { property_id, kind, url } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize positioning of the `Property` media.
        tx.execute(Lock(By::<Property, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;
        if property.is_deleted() {
            return Err(tracerr::new!(E::PropertyDeleted(property_id)));
        }

        let last = tx
            .execute(Select(By::<Option<media::Position>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let position = match last {
            Some(last) => last
                .next()
                .ok_or(E::PositionsExhausted(property_id))
                .map_err(tracerr::wrap!())?,
            None => media::Position::default(),
        };

        let draft = media::Draft {
            property_id,
            kind,
            url,
            position,
            created_at: DateTime::now().coerce(),
        };
        let id = tx
            .execute(Insert(draft.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Media(id: {id})` attached at position {position}");

        Ok(draft.into_media(id))
    }
}

/// Error of [`AddPropertyMedia`] [`Command`] execution.
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

    /// No more [`media::Position`]s left for the [`Property`].
    #[display("`Property(id: {_0})` has no free `media::Position` left")]
    #[from(ignore)]
    PositionsExhausted(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{create_property, SoftDeleteProperty},
        domain::{property::media, user},
        Command as _,
    };

    use super::{AddPropertyMedia, ExecutionError};

    #[tokio::test]
    async fn appends_after_last() {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let property = svc
            .execute(create_property::spec::command(landlord))
            .await
            .unwrap();
        let add = |url: &str| AddPropertyMedia {
            property_id: property.id,
            kind: media::MediaType::Image,
            url: media::Url::new(url).unwrap(),
        };

        let first = svc.execute(add("/a.jpg")).await.unwrap();
        let second = svc.execute(add("/b.jpg")).await.unwrap();

        assert_eq!(first.position, media::Position::default());
        assert_eq!(Some(second.position), first.position.next());
        assert_eq!(first.property_id, property.id);
        assert!(!second.is_deleted());
    }

    #[tokio::test]
    async fn rejects_deleted_property() {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let property = svc
            .execute(create_property::spec::command(landlord))
            .await
            .unwrap();
        _ = svc
            .execute(SoftDeleteProperty { property_id: property.id })
            .await
            .unwrap();

        let err = svc
            .execute(AddPropertyMedia {
                property_id: property.id,
                kind: media::MediaType::Video,
                url: media::Url::new("/tour.mp4").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.into_inner(), ExecutionError::PropertyDeleted(_)));
    }
}
