//! [`Property`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{property, user, Property},
    infra::{
        database::{
            self,
            postgres::{Connection, FuzzPattern},
            Postgres,
        },
        Database,
    },
    read::property::list,
};

/// SQL conditions applying a [`list::Filter`].
///
/// Expects `$1` to `$10` parameters to be bound by [`FilterParams::sql()`].
const FILTER: &str = "\
    ($1::BOOL OR NOT is_deleted) \
    AND ($2::INT4 IS NULL OR landlord_id = $2::INT4) \
    AND ($3::VARCHAR IS NULL OR status = $3::VARCHAR) \
    AND ($4::VARCHAR IS NULL \
         OR LOWER(CONCAT_WS(' ', address_line1, address_line2, \
                                 city, district)) \
            SIMILAR TO $4::VARCHAR) \
    AND ($5::VARCHAR IS NULL OR property_type = $5::VARCHAR) \
    AND ($6::INT4 IS NULL OR bedrooms = $6::INT4) \
    AND ($7::FLOAT8 IS NULL OR rent_price_monthly >= $7::FLOAT8) \
    AND ($8::FLOAT8 IS NULL OR rent_price_monthly <= $8::FLOAT8) \
    AND ($9::FLOAT8 IS NULL OR area_sqm >= $9::FLOAT8) \
    AND ($10::FLOAT8 IS NULL OR area_sqm <= $10::FLOAT8)";

/// SQL parameters of a [`list::Filter`].
struct FilterParams {
    /// Indicator whether logically deleted rows pass the filter.
    include_deleted: bool,

    /// ID of the landlord to filter by, if any.
    landlord_id: Option<user::Id>,

    /// [`property::Status`] to filter by, if any.
    status: Option<property::Status>,

    /// [`FuzzPattern`] to filter the address by, if any.
    address: Option<FuzzPattern>,

    /// [`property::Kind`] to filter by, if any.
    kind: Option<property::Kind>,

    /// Number of bedrooms to filter by, if any.
    bedrooms: Option<property::RoomCount>,

    /// Lowest monthly rent, if any.
    min_rent: Option<property::Price>,

    /// Highest monthly rent, if any.
    max_rent: Option<property::Price>,

    /// Smallest area, if any.
    min_area: Option<property::Area>,

    /// Largest area, if any.
    max_area: Option<property::Area>,
}

impl From<list::Filter> for FilterParams {
    fn from(filter: list::Filter) -> Self {
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
        Self {
            include_deleted,
            landlord_id,
            status,
            address: address.as_deref().and_then(FuzzPattern::new),
            kind,
            bedrooms,
            min_rent,
            max_rent,
            min_area,
            max_area,
        }
    }
}

impl FilterParams {
    /// Returns the parameters in the [`FILTER`] order.
    fn sql(&self) -> [&(dyn ToSql + Sync); 10] {
        [
            &self.include_deleted,
            &self.landlord_id,
            &self.status,
            &self.address,
            &self.kind,
            &self.bedrooms,
            &self.min_rent,
            &self.max_rent,
            &self.min_area,
            &self.max_area,
        ]
    }
}

impl<C> Database<Select<By<Option<Property>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, landlord_id, title, description, \
                   address_line1, address_line2, city, district, \
                   postal_code, property_type, area_sqm, \
                   bedrooms, bathrooms, \
                   rent_price_monthly, deposit_amount, status, \
                   created_at, updated_at, deleted_at \
            FROM properties \
            WHERE id = $1::INT4";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Property {
                id: row.get("id"),
                landlord_id: row.get("landlord_id"),
                title: row.get("title"),
                description: row.get("description"),
                address_line1: row.get("address_line1"),
                address_line2: row.get("address_line2"),
                city: row.get("city"),
                district: row.get("district"),
                postal_code: row.get("postal_code"),
                kind: row.get("property_type"),
                area: row.get("area_sqm"),
                bedrooms: row.get("bedrooms"),
                bathrooms: row.get("bathrooms"),
                rent_price_monthly: row.get("rent_price_monthly"),
                deposit_amount: row.get("deposit_amount"),
                status: row.get("status"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
                deleted_at: row.get("deleted_at"),
            }))
    }
}

impl<C> Database<Insert<property::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = property::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<property::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let property::Draft {
            landlord_id,
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
            created_at,
            updated_at,
        } = draft;

        const SQL: &str = "\
            INSERT INTO properties (\
                landlord_id, title, description, \
                address_line1, address_line2, city, district, postal_code, \
                property_type, area_sqm, bedrooms, bathrooms, \
                rent_price_monthly, deposit_amount, status, \
                created_at, updated_at, is_deleted, deleted_at \
            ) VALUES (\
                $1::INT4, $2::VARCHAR, $3::TEXT, \
                $4::VARCHAR, $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, \
                $8::VARCHAR, \
                $9::VARCHAR, $10::FLOAT8, $11::INT4, $12::INT4, \
                $13::FLOAT8, $14::FLOAT8, $15::VARCHAR, \
                $16::TIMESTAMPTZ, $17::TIMESTAMPTZ, FALSE, NULL \
            ) \
            RETURNING id";
        self.query_opt(
            SQL,
            &[
                &landlord_id,
                &title,
                &description,
                &address_line1,
                &address_line2,
                &city,
                &district,
                &postal_code,
                &kind,
                &area,
                &bedrooms,
                &bathrooms,
                &rent_price_monthly,
                &deposit_amount,
                &status,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| row.expect("`RETURNING` always returns").get("id"))
    }
}

impl<C> Database<Update<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let is_deleted = property.is_deleted();
        let Property {
            id,
            landlord_id,
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
            created_at: _,
            updated_at,
            deleted_at,
        } = property;

        const SQL: &str = "\
            UPDATE properties \
            SET landlord_id = $2::INT4, \
                title = $3::VARCHAR, \
                description = $4::TEXT, \
                address_line1 = $5::VARCHAR, \
                address_line2 = $6::VARCHAR, \
                city = $7::VARCHAR, \
                district = $8::VARCHAR, \
                postal_code = $9::VARCHAR, \
                property_type = $10::VARCHAR, \
                area_sqm = $11::FLOAT8, \
                bedrooms = $12::INT4, \
                bathrooms = $13::INT4, \
                rent_price_monthly = $14::FLOAT8, \
                deposit_amount = $15::FLOAT8, \
                status = $16::VARCHAR, \
                updated_at = $17::TIMESTAMPTZ, \
                is_deleted = $18::BOOL, \
                deleted_at = $19::TIMESTAMPTZ \
            WHERE id = $1::INT4";
        self.exec(
            SQL,
            &[
                &id,
                &landlord_id,
                &title,
                &description,
                &address_line1,
                &address_line2,
                &city,
                &district,
                &postal_code,
                &kind,
                &area,
                &bedrooms,
                &bathrooms,
                &rent_price_monthly,
                &deposit_amount,
                &status,
                &updated_at,
                &is_deleted,
                &deleted_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Property, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM properties \
            WHERE id = $1::INT4 \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<list::Page, list::Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector { arguments, filter } = by.into_inner();
        let filter = FilterParams::from(filter);

        let limit = i64::try_from(arguments.limit().saturating_add(1))
            .unwrap_or(i64::MAX);
        let cursor = arguments.cursor().copied();

        let sql = format!(
            "SELECT id \
             FROM properties \
             WHERE {FILTER} \
               AND ($11::INT4 IS NULL OR id {op} $11::INT4) \
             ORDER BY id {order} \
             LIMIT $12::INT8",
            op = arguments.kind().operator(),
            order = arguments.kind().order().sql(),
        );
        let page: [&(dyn ToSql + Sync); 2] = [&cursor, &limit];
        let params = filter.sql().into_iter().chain(page).collect::<Vec<_>>();
        let rows = self
            .query(&sql, &params)
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let edges = rows
            .into_iter()
            .take(arguments.limit())
            .map(|row| {
                let id: property::Id = row.get("id");
                (id, id)
            })
            .collect::<Vec<_>>();

        Ok(list::Page::new(&arguments, edges, has_more))
    }
}

impl<C> Database<Select<By<list::TotalCount, list::Filter>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::TotalCount, list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = FilterParams::from(by.into_inner());

        let sql = format!(
            "SELECT COUNT(*) \
             FROM properties \
             WHERE {FILTER}",
        );
        self.query_opt(&sql, &filter.sql())
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
