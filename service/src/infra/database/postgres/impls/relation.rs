//! [`Database`] implementations of [`Property`] relations.

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Property;
use crate::{
    domain::{property, Amenity, Lease, MaintenanceRequest},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Amenity>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Amenity>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Amenity>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, name, created_at \
            FROM property_amenities \
            WHERE property_id = $1::INT4 \
            ORDER BY id";
        Ok(self
            .query(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Amenity {
                id: row.get("id"),
                property_id: row.get("property_id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Lease>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Lease>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Lease>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, tenant_id, status, \
                   starts_at, ends_at, rent_amount, deposit_amount, \
                   created_at, updated_at \
            FROM leases \
            WHERE property_id = $1::INT4 \
            ORDER BY id";
        Ok(self
            .query(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Lease {
                id: row.get("id"),
                property_id: row.get("property_id"),
                tenant_id: row.get("tenant_id"),
                status: row.get("status"),
                starts_at: row.get("starts_at"),
                ends_at: row.get("ends_at"),
                rent_amount: row.get("rent_amount"),
                deposit_amount: row.get("deposit_amount"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<MaintenanceRequest>, property::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<MaintenanceRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<MaintenanceRequest>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, tenant_id, title, description, \
                   priority, status, created_at, updated_at \
            FROM maintenance_requests \
            WHERE property_id = $1::INT4 \
            ORDER BY id";
        Ok(self
            .query(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| MaintenanceRequest {
                id: row.get("id"),
                property_id: row.get("property_id"),
                tenant_id: row.get("tenant_id"),
                title: row.get("title"),
                description: row.get("description"),
                priority: row.get("priority"),
                status: row.get("status"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            })
            .collect())
    }
}
