//! [`Command`] for removing a [`Media`] from its [`Property`].

use common::operations::{By, Commit, Lock, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Property;
use crate::{
    domain::{property::media, Media},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing a [`Media`] from its [`Property`].
///
/// The [`Media`] is deleted logically.
#[derive(Clone, Copy, Debug, From)]
pub struct RemovePropertyMedia {
    /// ID of the [`Media`] to be removed.
    pub media_id: media::Id,
}

impl<Db> Command<RemovePropertyMedia> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Media, media::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Media>, media::Id>>,
            Ok = Option<Media>,
            Err = Traced<database::Error>,
        > + Database<Update<Media>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Media;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(media_id = %cmd.media_id))]
    async fn execute(
        &self,
        cmd: RemovePropertyMedia,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemovePropertyMedia { media_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Media`.
        tx.execute(Lock(By::<Media, _>::new(media_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut media = tx
            .execute(Select(By::<Option<Media>, _>::new(media_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::MediaNotExists(media_id))
            .map_err(tracerr::wrap!())?;
        if media.is_deleted() {
            return Ok(media);
        }

        _ = media.soft_delete();
        tx.execute(Update(media.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Media(id: {media_id})` removed");

        Ok(media)
    }
}

/// Error of [`RemovePropertyMedia`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Media`] doesn't exist.
    #[display("`Media(id: {_0})` does not exist")]
    #[from(ignore)]
    MediaNotExists(#[error(not(source))] media::Id),
}
