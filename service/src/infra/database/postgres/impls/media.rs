//! [`Media`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, media},
        Media,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `property_media` table composing a [`Media`].
const COLUMNS: &str = "\
    id, property_id, media_type, file_url, sort_order, \
    created_at, deleted_at";

/// Builds a [`Media`] out of the provided [`COLUMNS`] `row`.
fn from_row(row: &Row) -> Media {
    Media {
        id: row.get("id"),
        property_id: row.get("property_id"),
        kind: row.get("media_type"),
        url: row.get("file_url"),
        position: row.get("sort_order"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Option<Media>, media::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Media>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Media>, media::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: media::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM property_media \
             WHERE id = $1::INT4",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Media>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Media>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Media>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM property_media \
             WHERE property_id = $1::INT4 \
             ORDER BY sort_order, id",
        );
        self.query(&sql, &[&property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(from_row).collect())
    }
}

impl<C> Database<Select<By<Option<media::Position>, property::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<media::Position>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<media::Position>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT MAX(sort_order) AS last \
            FROM property_media \
            WHERE property_id = $1::INT4";
        self.query_opt(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.and_then(|r| r.get("last")))
    }
}

impl<C> Database<Insert<media::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = media::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<media::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let media::Draft { property_id, kind, url, position, created_at } =
            draft;

        const SQL: &str = "\
            INSERT INTO property_media (\
                property_id, media_type, file_url, sort_order, \
                created_at, is_deleted, deleted_at \
            ) VALUES (\
                $1::INT4, $2::VARCHAR, $3::VARCHAR, $4::INT4, \
                $5::TIMESTAMPTZ, FALSE, NULL \
            ) \
            RETURNING id";
        self.query_opt(
            SQL,
            &[&property_id, &kind, &url, &position, &created_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| row.expect("`RETURNING` always returns").get("id"))
    }
}

impl<C> Database<Update<Media>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(media): Update<Media>,
    ) -> Result<Self::Ok, Self::Err> {
        let is_deleted = media.is_deleted();
        let Media {
            id,
            property_id: _,
            kind,
            url,
            position,
            created_at: _,
            deleted_at,
        } = media;

        const SQL: &str = "\
            UPDATE property_media \
            SET media_type = $2::VARCHAR, \
                file_url = $3::VARCHAR, \
                sort_order = $4::INT4, \
                is_deleted = $5::BOOL, \
                deleted_at = $6::TIMESTAMPTZ \
            WHERE id = $1::INT4";
        self.exec(
            SQL,
            &[&id, &kind, &url, &position, &is_deleted, &deleted_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Media, media::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Media, media::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: media::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM property_media \
            WHERE id = $1::INT4 \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
