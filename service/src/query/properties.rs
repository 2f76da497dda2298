//! [`Query`] collection related to the multiple [`Property`] records.

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::{domain::Property, Config};
use crate::{
    infra::{database, Database},
    read::property::list,
    Service,
};

use super::{DatabaseQuery, Query};

/// Queries a page of [`Property`] records.
///
/// The requested page size is capped with [`Config::max_page_size`].
#[derive(Clone, Debug)]
pub struct List {
    /// Pagination [`list::Arguments`].
    pub arguments: list::Arguments,

    /// [`list::Filter`] to apply.
    pub filter: list::Filter,
}

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<database::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        List { arguments, filter }: List,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = list::Selector {
            arguments: arguments.capped(self.config().max_page_size),
            filter,
        };
        self.database()
            .execute(Select(By::new(selector)))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries total count of [`Property`] list items matching a
/// [`list::Filter`].
pub type TotalCount = DatabaseQuery<By<list::TotalCount, list::Filter>>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::{
        command::{create_property, SoftDeleteProperty},
        domain::{property, user, User},
        infra::database::Memory,
        read::property::list,
        Config, Query as _, Service,
    };

    use super::{List, TotalCount};

    async fn seeded(count: usize) -> (Service<Memory>, Vec<property::Id>) {
        let (svc, landlord) = create_property::spec::service(user::Role::Landlord);
        let mut ids = vec![];
        for _ in 0..count {
            let p = svc
                .execute(create_property::spec::command(landlord))
                .await
                .unwrap();
            ids.push(p.id);
        }
        let svc = Service::new(Config { max_page_size: 2 }, svc.database().clone());
        (svc, ids)
    }

    fn forward(first: usize, after: Option<property::Id>) -> list::Arguments {
        list::Arguments::Forward { first, after }
    }

    #[tokio::test]
    async fn caps_page_size() {
        let (svc, ids) = seeded(3).await;

        let page = svc
            .execute(List {
                arguments: forward(50, None),
                filter: list::Filter::default(),
            })
            .await
            .unwrap();

        assert_eq!(page.nodes().copied().collect::<Vec<_>>(), ids[..2]);
        assert!(page.page_info().has_next_page);

        let rest = svc
            .execute(List {
                arguments: forward(2, page.page_info().end_cursor),
                filter: list::Filter::default(),
            })
            .await
            .unwrap();

        assert_eq!(rest.nodes().copied().collect::<Vec<_>>(), ids[2..]);
        assert!(!rest.page_info().has_next_page);
    }

    #[tokio::test]
    async fn hides_deleted_unless_asked() {
        let (svc, ids) = seeded(2).await;
        _ = svc
            .execute(SoftDeleteProperty { property_id: ids[0] })
            .await
            .unwrap();

        let live = svc
            .execute(TotalCount::by(list::Filter::default()))
            .await
            .unwrap();
        assert_eq!(i64::from(live), 1);

        let all = svc
            .execute(TotalCount::by(list::Filter {
                include_deleted: true,
                ..list::Filter::default()
            }))
            .await
            .unwrap();
        assert_eq!(i64::from(all), 2);
    }

    #[tokio::test]
    async fn filters_by_address_and_status() {
        let (svc, _) = seeded(1).await;

        let count = |address: &str, status| {
            svc.execute(TotalCount::by(list::Filter {
                address: Some(address.into()),
                status,
                ..list::Filter::default()
            }))
        };

        assert_eq!(i64::from(count("garden", None).await.unwrap()), 1);
        assert_eq!(i64::from(count("XUHUI road", None).await.unwrap()), 1);
        assert_eq!(i64::from(count("harbour", None).await.unwrap()), 0);
        assert_eq!(
            i64::from(
                count("garden", Some(property::Status::Rented))
                    .await
                    .unwrap()
            ),
            0,
        );
    }

    #[tokio::test]
    async fn pages_backward_from_the_end() {
        let (svc, ids) = seeded(3).await;

        let page = svc
            .execute(List {
                arguments: list::Arguments::Backward { last: 2, before: None },
                filter: list::Filter::default(),
            })
            .await
            .unwrap();

        assert_eq!(
            page.nodes().copied().collect::<Vec<_>>(),
            [ids[2], ids[1]],
        );
        assert!(page.page_info().has_previous_page);
        assert!(!page.page_info().has_next_page);

        let rest = svc
            .execute(List {
                arguments: list::Arguments::Backward {
                    last: 2,
                    before: page.page_info().end_cursor,
                },
                filter: list::Filter::default(),
            })
            .await
            .unwrap();

        assert_eq!(rest.nodes().copied().collect::<Vec<_>>(), [ids[0]]);
        assert!(!rest.page_info().has_previous_page);
    }

    #[tokio::test]
    async fn counts_per_landlord() {
        let (svc, _) = seeded(3).await;
        let other = svc.database().add_user(User {
            id: user::Id::from(2),
            username: user::Username::new("other").unwrap(),
            email: user::Email::new("other@example.com").unwrap(),
            role: user::Role::Landlord,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        });
        _ = svc
            .execute(create_property::spec::command(other))
            .await
            .unwrap();

        let count = |landlord_id| {
            svc.execute(TotalCount::by(list::Filter {
                landlord_id: Some(landlord_id),
                ..list::Filter::default()
            }))
        };

        assert_eq!(i64::from(count(user::Id::from(1)).await.unwrap()), 3);
        assert_eq!(i64::from(count(other).await.unwrap()), 1);
        assert_eq!(i64::from(count(user::Id::from(99)).await.unwrap()), 0);
    }

    #[tokio::test]
    async fn filters_by_kind_rooms_rent_and_area() {
        let (svc, _) = seeded(1).await;

        let count = |filter| svc.execute(TotalCount::by(filter));
        let rent = property::Price::new;
        let area = property::Area::new;

        for (filter, expected) in [
            (list::Filter::default(), 1),
            (
                list::Filter {
                    kind: property::Kind::new("apartment"),
                    ..list::Filter::default()
                },
                1,
            ),
            (
                list::Filter {
                    kind: property::Kind::new("house"),
                    ..list::Filter::default()
                },
                0,
            ),
            (
                list::Filter {
                    bedrooms: property::RoomCount::new(2),
                    ..list::Filter::default()
                },
                1,
            ),
            (
                list::Filter {
                    bedrooms: property::RoomCount::new(3),
                    ..list::Filter::default()
                },
                0,
            ),
            (
                list::Filter {
                    min_rent: rent(6500.0),
                    max_rent: rent(6500.0),
                    ..list::Filter::default()
                },
                1,
            ),
            (
                list::Filter {
                    min_rent: rent(7000.0),
                    ..list::Filter::default()
                },
                0,
            ),
            (
                list::Filter {
                    max_rent: rent(5000.0),
                    ..list::Filter::default()
                },
                0,
            ),
            (
                list::Filter {
                    min_area: area(50.0),
                    max_area: area(80.0),
                    ..list::Filter::default()
                },
                1,
            ),
            (
                list::Filter {
                    min_area: area(80.0),
                    ..list::Filter::default()
                },
                0,
            ),
        ] {
            assert_eq!(
                i64::from(count(filter.clone()).await.unwrap()),
                expected,
                "{filter:?}",
            );
        }
    }
}
