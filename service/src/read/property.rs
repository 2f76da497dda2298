//! [`Property`]-related read definitions.

#[cfg(doc)]
use crate::domain::Property;

pub mod list {
    //! [`Property`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{property, user};
    #[cfg(doc)]
    use crate::domain::{Property, User};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = property::Id;

    /// Cursor pointing to a specific [`Property`] in a list.
    pub type Cursor = property::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// ID of the landlord [`User`] to list [`Property`] records of.
        pub landlord_id: Option<user::Id>,

        /// [`property::Status`] the listed [`Property`] records must have.
        pub status: Option<property::Status>,

        /// Words to fuzzy search for in a [`Property`] address.
        pub address: Option<String>,

        /// [`property::Kind`] the listed [`Property`] records must have.
        pub kind: Option<property::Kind>,

        /// Exact number of bedrooms the listed [`Property`] records must
        /// have.
        pub bedrooms: Option<property::RoomCount>,

        /// Lowest monthly rent (inclusive).
        pub min_rent: Option<property::Price>,

        /// Highest monthly rent (inclusive).
        pub max_rent: Option<property::Price>,

        /// Smallest [`property::Area`] (inclusive).
        pub min_area: Option<property::Area>,

        /// Largest [`property::Area`] (inclusive).
        pub max_area: Option<property::Area>,

        /// Indicator whether logically deleted [`Property`] records should be
        /// listed too.
        pub include_deleted: bool,
    }

    /// Total count of [`Property`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);
}
