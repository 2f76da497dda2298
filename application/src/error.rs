//! [`Error`] definitions.

use derive_more::{Display, Error as StdError, From};
use service::{
    command::{
        add_property_media, create_property, remove_property_media,
        soft_delete_property, update_property,
    },
    domain::property,
    infra::database,
};

/// Error of running a [`cli`] command.
///
/// [`cli`]: crate::cli
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Database error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Error of creating a property.
    #[display("Failed to create `Property`: {_0}")]
    Create(create_property::ExecutionError),

    /// Error of updating a property.
    #[display("Failed to update `Property`: {_0}")]
    Update(update_property::ExecutionError),

    /// Error of attaching a media file to a property.
    #[display("Failed to add `Media`: {_0}")]
    AddMedia(add_property_media::ExecutionError),

    /// Error of removing a media file.
    #[display("Failed to remove `Media`: {_0}")]
    RemoveMedia(remove_property_media::ExecutionError),

    /// Error of deleting a property.
    #[display("Failed to delete `Property`: {_0}")]
    SoftDelete(soft_delete_property::ExecutionError),

    /// Requested property doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// Both `--first`/`--after` and `--last`/`--before` are provided.
    #[display("Forward and backward pagination cannot be mixed")]
    #[from(ignore)]
    AmbiguousPagination,
}
