//! Execution of [`args::Property`] commands over the [`Service`].

use std::fmt;

use futures::try_join;
use service::{
    command::{
        AddPropertyMedia, CreateProperty, RemovePropertyMedia,
        SoftDeleteProperty, UpdateProperty,
    },
    domain::{
        property::{self, media},
        Amenity, Lease, MaintenanceRequest, Property, User,
    },
    query,
    read::property::list,
    Query as _,
};
use tracerr::Traced;

use crate::{args, Error, Service};

/// Default number of properties listed when no `--first` or `--last` is
/// provided.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Executes the provided [`args::Property`] command, returning its
/// human-readable output.
///
/// # Errors
///
/// If the requested property doesn't exist, the provided arguments are
/// invalid or the [`Service`] fails.
pub async fn execute(
    service: &Service,
    cmd: args::Property,
) -> Result<String, Traced<Error>> {
    match cmd {
        args::Property::Show { id } => {
            show(service, id).await.map(|d| d.to_string())
        }
        args::Property::List(opts) => {
            let (arguments, filter) = selector(opts)?;
            let (page, total) = try_join!(
                service.execute(query::properties::List {
                    arguments,
                    filter: filter.clone(),
                }),
                service.execute(query::properties::TotalCount::by(filter)),
            )
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
            Ok(Listing { page, total }.to_string())
        }
        args::Property::Create(create) => {
            let property = service
                .execute(CreateProperty::from(create))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
            Ok(format!(
                "`Property(id: {})` created with status {}\n",
                property.id, property.status,
            ))
        }
        args::Property::Update(update) => {
            let property = service
                .execute(UpdateProperty::from(update))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
            Ok(format!(
                "`Property(id: {})` updated at {}\n",
                property.id, property.updated_at,
            ))
        }
        args::Property::MainImage { id } => {
            _ = property(service, id).await?;
            let url = service
                .execute(query::property::MainImageUrl { property_id: id })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
            Ok(format!("{}\n", opt(url)))
        }
        args::Property::AddMedia {
            property_id,
            kind,
            url,
        } => {
            let media = service
                .execute(AddPropertyMedia {
                    property_id,
                    kind,
                    url,
                })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
            Ok(format!(
                "`Media(id: {})` added to `Property(id: {})` at position {}\n",
                media.id, media.property_id, media.position,
            ))
        }
        args::Property::RemoveMedia { media_id } => {
            let media = service
                .execute(RemovePropertyMedia { media_id })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
            Ok(format!(
                "`Media(id: {})` removed from `Property(id: {})`\n",
                media.id, media.property_id,
            ))
        }
        args::Property::Delete { id } => {
            let property = service
                .execute(SoftDeleteProperty { property_id: id })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
            Ok(format!(
                "`Property(id: {})` deleted at {}\n",
                property.id,
                opt(property.deleted_at.as_ref()),
            ))
        }
    }
}

/// Splits the provided [`args::List`] into pagination [`list::Arguments`]
/// and a [`list::Filter`].
///
/// # Errors
///
/// With [`Error::AmbiguousPagination`] if both pagination directions are
/// requested at once.
fn selector(
    opts: args::List,
) -> Result<(list::Arguments, list::Filter), Traced<Error>> {
    let args::List {
        landlord,
        status,
        address,
        kind,
        bedrooms,
        min_rent,
        max_rent,
        min_area,
        max_area,
        include_deleted,
        first,
        after,
        last,
        before,
    } = opts;

    let arguments =
        list::Arguments::new(first, after, last, before, DEFAULT_PAGE_SIZE)
            .ok_or(Error::AmbiguousPagination)
            .map_err(tracerr::wrap!())?;
    let filter = list::Filter {
        landlord_id: landlord,
        status,
        address,
        kind,
        bedrooms,
        min_rent,
        max_rent,
        min_area,
        max_area,
        include_deleted,
    };
    Ok((arguments, filter))
}

impl From<args::Create> for CreateProperty {
    fn from(create: args::Create) -> Self {
        let args::Create {
            landlord,
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
            rent,
            deposit,
            status,
        } = create;

        Self {
            landlord_id: landlord,
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
            rent_price_monthly: rent,
            deposit_amount: deposit,
            status,
        }
    }
}

impl From<args::Update> for UpdateProperty {
    fn from(update: args::Update) -> Self {
        let args::Update {
            id,
            title,
            description,
            clear_description,
            address_line1,
            address_line2,
            clear_address_line2,
            city,
            district,
            postal_code,
            clear_postal_code,
            kind,
            area,
            bedrooms,
            bathrooms,
            rent,
            deposit,
            status,
        } = update;

        Self {
            title,
            description: clearable(description, clear_description),
            address_line1,
            address_line2: clearable(address_line2, clear_address_line2),
            city,
            district,
            postal_code: clearable(postal_code, clear_postal_code),
            kind,
            area,
            bedrooms,
            bathrooms,
            rent_price_monthly: rent,
            deposit_amount: deposit,
            status,
            ..Self::from(id)
        }
    }
}

/// Turns an optional new `value` of an optional field into an update of it,
/// where `clear` requests removing the current value.
fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

/// Queries the [`Property`] with the provided [`property::Id`], failing if
/// it doesn't exist.
async fn property(
    service: &Service,
    id: property::Id,
) -> Result<Property, Traced<Error>> {
    service
        .execute(query::property::ById::by(id))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> Error))?
        .ok_or(Error::PropertyNotExists(id))
        .map_err(tracerr::wrap!())
}

/// Queries [`Details`] of the [`Property`] with the provided
/// [`property::Id`].
async fn show(
    service: &Service,
    id: property::Id,
) -> Result<Details, Traced<Error>> {
    let property = property(service, id).await?;

    let (landlord, media, amenities, leases, maintenance) = try_join!(
        service.execute(query::property::Landlord::by(id)),
        service.execute(query::property::Media::by(id)),
        service.execute(query::property::Amenities::by(id)),
        service.execute(query::property::Leases::by(id)),
        service.execute(query::property::MaintenanceRequests::by(id)),
    )
    .map_err(tracerr::map_from_and_wrap!(=> Error))?;

    Ok(Details {
        property,
        landlord,
        media,
        amenities,
        leases,
        maintenance,
    })
}

/// [`Property`] along with its related records.
#[derive(Clone, Debug)]
pub struct Details {
    /// The [`Property`] itself.
    pub property: Property,

    /// Landlord [`User`] of the [`Property`].
    pub landlord: Option<User>,

    /// [`media::Media`] of the [`Property`].
    pub media: Vec<media::Media>,

    /// [`Amenity`] records of the [`Property`].
    pub amenities: Vec<Amenity>,

    /// [`Lease`] records of the [`Property`].
    pub leases: Vec<Lease>,

    /// [`MaintenanceRequest`] records of the [`Property`].
    pub maintenance: Vec<MaintenanceRequest>,
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            property: p,
            landlord,
            media,
            amenities,
            leases,
            maintenance,
        } = self;

        writeln!(f, "Property #{}: {}", p.id, p.title)?;
        writeln!(f, "  status:      {}", p.status)?;
        writeln!(f, "  deleted at:  {}", opt(p.deleted_at.as_ref()))?;
        writeln!(
            f,
            "  landlord:    {}",
            landlord.as_ref().map_or_else(
                || format!("#{} (missing)", p.landlord_id),
                |u| format!("#{} {} <{}>", u.id, u.username, u.email),
            ),
        )?;
        writeln!(
            f,
            "  address:     {}{}, {}, {}{}",
            p.address_line1,
            p.address_line2
                .as_ref()
                .map(|l| format!(", {l}"))
                .unwrap_or_default(),
            p.district,
            p.city,
            p.postal_code
                .as_ref()
                .map(|c| format!(" {c}"))
                .unwrap_or_default(),
        )?;
        writeln!(
            f,
            "  layout:      {}, {} sqm, {} bedrooms, {} bathrooms",
            p.kind, p.area, p.bedrooms, p.bathrooms,
        )?;
        writeln!(
            f,
            "  rent:        {} monthly, {} deposit",
            p.rent_price_monthly, p.deposit_amount,
        )?;
        writeln!(f, "  main image:  {}", opt(p.main_image_url(media)))?;
        writeln!(f, "  created at:  {}", p.created_at)?;
        writeln!(f, "  updated at:  {}", p.updated_at)?;

        writeln!(f, "Media ({}):", media.len())?;
        for m in media {
            writeln!(
                f,
                "  #{} [{}] {} {}{}",
                m.id,
                m.position,
                m.kind,
                m.url,
                if m.is_deleted() { " (deleted)" } else { "" },
            )?;
        }

        writeln!(f, "Amenities ({}):", amenities.len())?;
        for a in amenities {
            writeln!(f, "  #{} {}", a.id, a.name)?;
        }

        writeln!(f, "Leases ({}):", leases.len())?;
        for l in leases {
            writeln!(
                f,
                "  #{} {} tenant #{} from {} to {}",
                l.id, l.status, l.tenant_id, l.starts_at, l.ends_at,
            )?;
        }

        writeln!(f, "Maintenance requests ({}):", maintenance.len())?;
        for r in maintenance {
            writeln!(
                f,
                "  #{} {} [{}] {}",
                r.id, r.status, r.priority, r.title,
            )?;
        }

        Ok(())
    }
}

/// Page of [`Property`] IDs along with the total count of matching ones.
#[derive(Clone, Debug)]
pub struct Listing {
    /// Listed [`list::Page`].
    pub page: list::Page,

    /// Total count of [`Property`] records matching the filter.
    pub total: list::TotalCount,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { page, total } = self;

        for id in page.nodes() {
            writeln!(f, "{id}")?;
        }

        let info = page.page_info();
        write!(f, "shown {} of {}", page.edges.len(), i64::from(*total))?;
        if let (true, Some(cursor)) = (info.has_next_page, &info.end_cursor) {
            write!(f, ", next page: --after {cursor}")?;
        }
        if let (true, Some(cursor)) = (info.has_previous_page, info.end_cursor)
        {
            write!(f, ", previous page: --before {cursor}")?;
        }
        writeln!(f)
    }
}

/// Renders the provided optional value, using `-` for [`None`].
fn opt(value: Option<impl fmt::Display>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}
