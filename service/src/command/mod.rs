//! [`Command`] definition.

pub mod add_property_media;
pub mod create_property;
pub mod remove_property_media;
pub mod soft_delete_property;
pub mod update_property;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_property_media::AddPropertyMedia, create_property::CreateProperty,
    remove_property_media::RemovePropertyMedia,
    soft_delete_property::SoftDeleteProperty,
    update_property::UpdateProperty,
};
