//! [`Media`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use super::Property;

/// Media file (photo, video tour) attached to a [`Property`].
#[derive(Clone, Debug, PartialEq)]
pub struct Media {
    /// ID of this [`Media`].
    pub id: Id,

    /// ID of the [`Property`] this [`Media`] is attached to.
    pub property_id: super::Id,

    /// [`MediaType`] of this [`Media`].
    pub kind: MediaType,

    /// [`Url`] of the file of this [`Media`].
    pub url: Url,

    /// [`Position`] of this [`Media`] among the ones of its [`Property`].
    pub position: Position,

    /// [`DateTime`] when this [`Media`] was attached.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Media`] was logically deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

impl Media {
    /// Indicates whether this [`Media`] is logically deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Logically deletes this [`Media`].
    ///
    /// Always returns `true`.
    pub fn soft_delete(&mut self) -> bool {
        self.deleted_at = Some(DeletionDateTime::now());
        true
    }

    /// Returns the key this [`Media`] is ordered by within its [`Property`].
    #[must_use]
    pub fn sort_key(&self) -> (Position, Id) {
        (self.position, self.id)
    }
}

/// Picks the main image among the provided `media`.
///
/// That is the non-deleted [`MediaType::Image`] with the lowest
/// [`Media::sort_key()`].
pub fn main_image<'m>(
    media: impl IntoIterator<Item = &'m Media>,
) -> Option<&'m Media> {
    media
        .into_iter()
        .filter(|m| !m.is_deleted() && m.kind == MediaType::Image)
        .min_by_key(|m| m.sort_key())
}

/// [`Media`] that is not persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    /// ID of the [`Property`] the [`Media`] is attached to.
    pub property_id: super::Id,

    /// [`MediaType`] of the [`Media`].
    pub kind: MediaType,

    /// [`Url`] of the file of the [`Media`].
    pub url: Url,

    /// [`Position`] of the [`Media`].
    pub position: Position,

    /// [`DateTime`] when the [`Media`] was attached.
    pub created_at: CreationDateTime,
}

impl Draft {
    /// Turns this [`Draft`] into a [`Media`] persisted under the provided
    /// [`Id`].
    #[must_use]
    pub fn into_media(self, id: Id) -> Media {
        let Self {
            property_id,
            kind,
            url,
            position,
            created_at,
        } = self;

        Media {
            id,
            property_id,
            kind,
            url,
            position,
            created_at,
            deleted_at: None,
        }
    }
}

/// ID of a [`Media`].
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
    #[doc = "URL (or storage path) of a [`Media`] file."]
    Url(max = 512)
}

/// Explicit sort key of a [`Media`] within its [`Property`].
///
/// Lower goes first.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Position(i32);

impl Position {
    /// Creates a new [`Position`] if the given `value` is not negative.
    #[must_use]
    pub fn new(value: i32) -> Option<Self> {
        (value >= 0).then_some(Self(value))
    }

    /// Returns the [`Position`] right after this one, if it's representable.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

define_kind! {
    #[doc = "Type of a [`Media`] file."]
    enum MediaType {
        #[doc = "Still picture."]
        Image = "image",

        #[doc = "Video clip."]
        Video = "video",
    }
}

/// [`DateTime`] when a [`Media`] was attached.
pub type CreationDateTime = DateTimeOf<(Media, unit::Creation)>;

/// [`DateTime`] when a [`Media`] was logically deleted.
pub type DeletionDateTime = DateTimeOf<(Media, unit::Deletion)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{main_image, Draft, Id, Media, MediaType, Position, Url};
    use crate::domain::property;

    fn media(id: i32, kind: MediaType, position: i32) -> Media {
        Draft {
            property_id: property::Id::from(1),
            kind,
            url: Url::new(format!("/media/{id}")).unwrap(),
            position: Position::new(position).unwrap(),
            created_at: DateTime::now().coerce(),
        }
        .into_media(Id::from(id))
    }

    #[test]
    fn position_is_not_negative() {
        assert!(Position::new(-1).is_none());
        assert_eq!(Position::new(0), Some(Position::default()));
        assert_eq!(Position::new(4).unwrap().next(), Position::new(5));
        assert_eq!(Position::new(i32::MAX).unwrap().next(), None);
    }

    #[test]
    fn url_is_limited() {
        assert!(Url::new("/a.jpg").is_some());
        assert!(Url::new("a".repeat(512)).is_some());
        assert!(Url::new("a".repeat(513)).is_none());
        assert!(Url::new("").is_none());
    }

    #[test]
    fn soft_delete_marks_deleted() {
        let mut m = media(1, MediaType::Image, 0);
        assert!(!m.is_deleted());

        assert!(m.soft_delete());

        assert!(m.is_deleted());
    }

    #[test]
    fn main_image_skips_videos_and_deleted() {
        let mut deleted = media(1, MediaType::Image, 0);
        _ = deleted.soft_delete();
        let all = [
            deleted,
            media(2, MediaType::Video, 1),
            media(3, MediaType::Image, 2),
        ];

        assert_eq!(main_image(&all).map(|m| m.id), Some(Id::from(3)));
    }

    #[test]
    fn main_image_ties_break_by_id() {
        let all = [
            media(4, MediaType::Image, 1),
            media(2, MediaType::Image, 1),
            media(3, MediaType::Image, 2),
        ];

        assert_eq!(main_image(&all).map(|m| m.id), Some(Id::from(2)));
    }

    #[test]
    fn no_main_image_in_empty_set() {
        let none: &[Media] = &[];

        assert_eq!(main_image(none), None);
    }
}
