//! In-memory [`Database`] implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Update,
};
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, media},
        user, Amenity, Lease, MaintenanceRequest, Media, Property, User,
    },
    infra::{database, Database},
    read::property::list,
};

/// [`Database`] keeping everything in memory.
///
/// [`Transact`] takes a snapshot of the current state, which replaces the
/// original one on [`Commit`].
#[derive(Clone, Debug, Default)]
pub(crate) struct Memory {
    /// Current [`State`] of this [`Memory`].
    state: Arc<Mutex<State>>,

    /// [`State`] to be replaced on [`Commit`], if this [`Memory`] is a
    /// transaction.
    origin: Option<Arc<Mutex<State>>>,
}

/// Data stored in a [`Memory`].
#[derive(Clone, Debug, Default)]
struct State {
    users: Vec<User>,
    properties: Vec<Property>,
    media: Vec<Media>,
    amenities: Vec<Amenity>,
    leases: Vec<Lease>,
    maintenance_requests: Vec<MaintenanceRequest>,
}

impl Memory {
    /// Adds the provided [`User`] and returns its ID.
    pub(crate) fn add_user(&self, user: User) -> user::Id {
        let id = user.id;
        self.state().users.push(user);
        id
    }

    /// Adds the provided [`Lease`].
    pub(crate) fn add_lease(&self, lease: Lease) {
        self.state().leases.push(lease);
    }

    /// Returns the stored [`Property`] with the provided ID, if any.
    pub(crate) fn property(&self, id: property::Id) -> Option<Property> {
        self.state().properties.iter().find(|p| p.id == id).cloned()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

/// Returns the next free ID among the provided ones.
fn next_id<Id: Into<i32>>(ids: impl Iterator<Item = Id>) -> i32 {
    ids.map(Into::into).max().unwrap_or(0) + 1
}

/// Checks whether the provided [`Property`] passes the [`list::Filter`].
fn passes(p: &Property, filter: &list::Filter) -> bool {
    let list::Filter {
        landlord_id,
        status,
        address,
        kind,
        bedrooms,
        min_rent,
        max_rent,
        min_area,
        max_area,
        include_deleted,
    } = filter;

    let in_address = |word: &str| {
        let word = word.to_lowercase();
        let parts: [Option<&str>; 4] = [
            Some(p.address_line1.as_ref()),
            p.address_line2.as_ref().map(AsRef::as_ref),
            Some(p.city.as_ref()),
            Some(p.district.as_ref()),
        ];
        parts
            .into_iter()
            .flatten()
            .any(|part| part.to_lowercase().contains(&word))
    };

    (*include_deleted || !p.is_deleted())
        && landlord_id.map_or(true, |id| p.landlord_id == id)
        && status.map_or(true, |s| p.status == s)
        && address
            .as_ref()
            .map_or(true, |a| a.split_whitespace().any(in_address))
        && kind.as_ref().map_or(true, |k| p.kind == *k)
        && bedrooms.map_or(true, |n| p.bedrooms == n)
        && min_rent.map_or(true, |r| p.rent_price_monthly >= r)
        && max_rent.map_or(true, |r| p.rent_price_monthly <= r)
        && min_area.map_or(true, |a| p.area >= a)
        && max_area.map_or(true, |a| p.area <= a)
}

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        let snapshot = self.state().clone();
        Ok(Self {
            state: Arc::new(Mutex::new(snapshot)),
            origin: Some(Arc::clone(&self.state)),
        })
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        if let Some(origin) = &self.origin {
            *origin.lock().unwrap() = self.state().clone();
        }
        Ok(())
    }
}

impl<W, B> Database<Lock<By<W, B>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Lock<By<W, B>>) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }
}

impl Database<Select<By<Option<User>, property::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(p) = self.property(by.into_inner()) else {
            return Ok(None);
        };
        Ok(self
            .state()
            .users
            .iter()
            .find(|u| u.id == p.landlord_id)
            .cloned())
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.property(by.into_inner()))
    }
}

impl Database<Insert<property::Draft>> for Memory {
    type Ok = property::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<property::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        let id = next_id(state.properties.iter().map(|p| p.id)).into();
        state.properties.push(draft.into_property(id));
        Ok(id)
    }
}

impl Database<Update<Property>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        if let Some(p) = state.properties.iter_mut().find(|p| p.id == property.id)
        {
            *p = property;
        }
        Ok(())
    }
}

impl Database<Select<By<Option<Media>, media::Id>>> for Memory {
    type Ok = Option<Media>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Media>, media::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().media.iter().find(|m| m.id == id).cloned())
    }
}

impl Database<Select<By<Option<media::Position>, property::Id>>> for Memory {
    type Ok = Option<media::Position>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<media::Position>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state()
            .media
            .iter()
            .filter(|m| m.property_id == id)
            .map(|m| m.position)
            .max())
    }
}

impl Database<Insert<media::Draft>> for Memory {
    type Ok = media::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<media::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        let id = next_id(state.media.iter().map(|m| m.id)).into();
        state.media.push(draft.into_media(id));
        Ok(id)
    }
}

impl Database<Update<Media>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(media): Update<Media>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        if let Some(m) = state.media.iter_mut().find(|m| m.id == media.id) {
            *m = media;
        }
        Ok(())
    }
}

impl Database<Select<By<Vec<Media>, property::Id>>> for Memory {
    type Ok = Vec<Media>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Media>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut media = self
            .state()
            .media
            .iter()
            .filter(|m| m.property_id == id)
            .cloned()
            .collect::<Vec<_>>();
        media.sort_by_key(Media::sort_key);
        Ok(media)
    }
}

impl Database<Select<By<Vec<Amenity>, property::Id>>> for Memory {
    type Ok = Vec<Amenity>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Amenity>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state()
            .amenities
            .iter()
            .filter(|a| a.property_id == id)
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Vec<Lease>, property::Id>>> for Memory {
    type Ok = Vec<Lease>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Lease>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state()
            .leases
            .iter()
            .filter(|l| l.property_id == id)
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Vec<MaintenanceRequest>, property::Id>>> for Memory {
    type Ok = Vec<MaintenanceRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<MaintenanceRequest>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state()
            .maintenance_requests
            .iter()
            .filter(|r| r.property_id == id)
            .cloned()
            .collect())
    }
}

impl Database<Select<By<list::Page, list::Selector>>> for Memory {
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector { arguments, filter } = by.into_inner();

        let mut ids = self
            .state()
            .properties
            .iter()
            .filter(|p| passes(p, &filter))
            .map(|p| p.id)
            .filter(|id| match &arguments {
                list::Arguments::Forward { after, .. } => {
                    after.map_or(true, |c| *id > c)
                }
                list::Arguments::Backward { before, .. } => {
                    before.map_or(true, |c| *id < c)
                }
            })
            .collect::<Vec<_>>();
        ids.sort_unstable();
        if matches!(arguments, list::Arguments::Backward { .. }) {
            ids.reverse();
        }

        let has_more = ids.len() > arguments.limit();
        let edges = ids
            .into_iter()
            .take(arguments.limit())
            .map(|id| (id, id))
            .collect::<Vec<_>>();

        Ok(list::Page::new(&arguments, edges, has_more))
    }
}

impl Database<Select<By<list::TotalCount, list::Filter>>> for Memory {
    type Ok = list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::TotalCount, list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        let count = self
            .state()
            .properties
            .iter()
            .filter(|p| passes(p, &filter))
            .count();
        Ok(i64::try_from(count).unwrap().into())
    }
}
