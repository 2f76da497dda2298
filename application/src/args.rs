//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use service::domain::{
    property::{self, media},
    user,
};

/// Administration tool of the rental property management system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Applies pending database migrations.
    Migrate,

    /// Inspects and manages properties.
    #[command(subcommand)]
    Property(Property),
}

/// Property-related [`Command`].
#[derive(Clone, Debug, Subcommand)]
pub enum Property {
    /// Shows a property along with its relations.
    Show {
        /// ID of the property.
        id: property::Id,
    },

    /// Lists properties page by page.
    List(List),

    /// Creates a new property.
    Create(Create),

    /// Updates fields of a property.
    Update(Update),

    /// Prints URL of the main image of a property.
    MainImage {
        /// ID of the property.
        id: property::Id,
    },

    /// Attaches an image or a video to a property.
    AddMedia {
        /// ID of the property.
        property_id: property::Id,

        /// Type of the media file.
        #[arg(long)]
        kind: media::MediaType,

        /// URL of the media file.
        #[arg(long)]
        url: media::Url,
    },

    /// Removes a media file from its property.
    RemoveMedia {
        /// ID of the media.
        media_id: media::Id,
    },

    /// Logically deletes a property.
    Delete {
        /// ID of the property.
        id: property::Id,
    },
}

/// Arguments of [`Property::List`].
#[derive(Clone, Debug, clap::Args)]
pub struct List {
    /// ID of the landlord to list properties of.
    #[arg(long)]
    pub landlord: Option<user::Id>,

    /// Status the listed properties must have.
    #[arg(long)]
    pub status: Option<property::Status>,

    /// Words to search for in property addresses.
    #[arg(long)]
    pub address: Option<String>,

    /// Kind the listed properties must have (apartment, house, ...).
    #[arg(long)]
    pub kind: Option<property::Kind>,

    /// Exact number of bedrooms.
    #[arg(long)]
    pub bedrooms: Option<property::RoomCount>,

    /// Lowest monthly rent.
    #[arg(long)]
    pub min_rent: Option<property::Price>,

    /// Highest monthly rent.
    #[arg(long)]
    pub max_rent: Option<property::Price>,

    /// Smallest area in square meters.
    #[arg(long)]
    pub min_area: Option<property::Area>,

    /// Largest area in square meters.
    #[arg(long)]
    pub max_area: Option<property::Area>,

    /// List logically deleted properties too.
    #[arg(long)]
    pub include_deleted: bool,

    /// Maximum number of properties to list from the start.
    #[arg(long)]
    pub first: Option<usize>,

    /// ID of the property to list the ones after.
    #[arg(long)]
    pub after: Option<property::Id>,

    /// Maximum number of properties to list from the end.
    #[arg(long)]
    pub last: Option<usize>,

    /// ID of the property to list the ones before.
    #[arg(long)]
    pub before: Option<property::Id>,
}

/// Arguments of [`Property::Create`].
#[derive(Clone, Debug, clap::Args)]
pub struct Create {
    /// ID of the landlord owning the property.
    #[arg(long)]
    pub landlord: user::Id,

    /// Title of the listing.
    #[arg(long)]
    pub title: property::Title,

    /// Free-text description.
    #[arg(long)]
    pub description: Option<property::Description>,

    /// First line of the street address.
    #[arg(long)]
    pub address_line1: property::AddressLine,

    /// Second line of the street address.
    #[arg(long)]
    pub address_line2: Option<property::AddressLine>,

    /// City the property is located in.
    #[arg(long)]
    pub city: property::City,

    /// District the property is located in.
    #[arg(long)]
    pub district: property::District,

    /// Postal code of the address.
    #[arg(long)]
    pub postal_code: Option<property::PostalCode>,

    /// Kind of the property (apartment, house, ...).
    #[arg(long)]
    pub kind: property::Kind,

    /// Area in square meters.
    #[arg(long)]
    pub area: property::Area,

    /// Number of bedrooms.
    #[arg(long)]
    pub bedrooms: property::RoomCount,

    /// Number of bathrooms.
    #[arg(long)]
    pub bathrooms: property::RoomCount,

    /// Monthly rent.
    #[arg(long)]
    pub rent: property::Price,

    /// Deposit required for renting.
    #[arg(long)]
    pub deposit: property::Price,

    /// Initial status (vacant if omitted).
    #[arg(long)]
    pub status: Option<property::Status>,
}

/// Arguments of [`Property::Update`].
///
/// Omitted fields are left untouched.
#[derive(Clone, Debug, clap::Args)]
pub struct Update {
    /// ID of the property.
    pub id: property::Id,

    /// New title of the listing.
    #[arg(long)]
    pub title: Option<property::Title>,

    /// New free-text description.
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<property::Description>,

    /// Removes the description.
    #[arg(long)]
    pub clear_description: bool,

    /// New first line of the street address.
    #[arg(long)]
    pub address_line1: Option<property::AddressLine>,

    /// New second line of the street address.
    #[arg(long, conflicts_with = "clear_address_line2")]
    pub address_line2: Option<property::AddressLine>,

    /// Removes the second line of the street address.
    #[arg(long)]
    pub clear_address_line2: bool,

    /// New city.
    #[arg(long)]
    pub city: Option<property::City>,

    /// New district.
    #[arg(long)]
    pub district: Option<property::District>,

    /// New postal code.
    #[arg(long, conflicts_with = "clear_postal_code")]
    pub postal_code: Option<property::PostalCode>,

    /// Removes the postal code.
    #[arg(long)]
    pub clear_postal_code: bool,

    /// New kind of the property.
    #[arg(long)]
    pub kind: Option<property::Kind>,

    /// New area in square meters.
    #[arg(long)]
    pub area: Option<property::Area>,

    /// New number of bedrooms.
    #[arg(long)]
    pub bedrooms: Option<property::RoomCount>,

    /// New number of bathrooms.
    #[arg(long)]
    pub bathrooms: Option<property::RoomCount>,

    /// New monthly rent.
    #[arg(long)]
    pub rent: Option<property::Price>,

    /// New deposit.
    #[arg(long)]
    pub deposit: Option<property::Price>,

    /// New status.
    #[arg(long)]
    pub status: Option<property::Status>,
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use service::domain::property::{self, media};

    use super::{Args, Command, Property};

    fn parse(args: &[&str]) -> Result<Property, clap::Error> {
        let args = Args::try_parse_from(
            ["application", "property"].iter().chain(args),
        )?;
        match args.command {
            Command::Property(p) => Ok(p),
            Command::Migrate => panic!("unexpected command: migrate"),
        }
    }

    #[test]
    fn parses_list_filters() {
        let args = Args::try_parse_from([
            "application",
            "property",
            "list",
            "--status",
            "rented",
            "--address",
            "garden road",
            "--first",
            "5",
            "--after",
            "10",
        ])
        .unwrap();

        assert_eq!(args.config, "config.toml");
        let Command::Property(Property::List(list)) = args.command else {
            panic!("unexpected command: {:?}", args.command);
        };
        assert_eq!(list.landlord, None);
        assert_eq!(list.status, Some(property::Status::Rented));
        assert_eq!(list.address.as_deref(), Some("garden road"));
        assert!(!list.include_deleted);
        assert_eq!(list.first, Some(5));
        assert_eq!(list.after, Some(property::Id::from(10)));
        assert_eq!(list.last, None);
    }

    #[test]
    fn parses_range_filters() {
        let Property::List(list) = parse(&[
            "list",
            "--kind",
            "house",
            "--bedrooms",
            "3",
            "--min-rent",
            "1000",
            "--max-rent",
            "2500.5",
            "--min-area",
            "40",
            "--max-area",
            "90",
            "--last",
            "4",
        ])
        .unwrap() else {
            panic!("expected `list`");
        };

        assert_eq!(list.kind, property::Kind::new("house"));
        assert_eq!(list.bedrooms, property::RoomCount::new(3));
        assert_eq!(list.min_rent, property::Price::new(1000.0));
        assert_eq!(list.max_rent, property::Price::new(2500.5));
        assert_eq!(list.min_area, property::Area::new(40.0));
        assert_eq!(list.max_area, property::Area::new(90.0));
        assert_eq!(list.last, Some(4));
    }

    #[test]
    fn rejects_negative_bedrooms() {
        assert!(parse(&["list", "--bedrooms=-1"]).is_err());
        assert!(parse(&["list", "--min-area", "0"]).is_err());
    }

    #[test]
    fn parses_create() {
        let Property::Create(create) = parse(&[
            "create",
            "--landlord",
            "3",
            "--title",
            "Sunny flat",
            "--address-line1",
            "1 Garden Road",
            "--city",
            "Springfield",
            "--district",
            "Old Town",
            "--kind",
            "apartment",
            "--area",
            "54.5",
            "--bedrooms",
            "2",
            "--bathrooms",
            "1",
            "--rent",
            "1200",
            "--deposit",
            "2400",
        ])
        .unwrap() else {
            panic!("expected `create`");
        };

        assert_eq!(create.landlord, 3.into());
        assert_eq!(create.title.to_string(), "Sunny flat");
        assert_eq!(create.description, None);
        assert_eq!(create.status, None);
        assert_eq!(create.rent, property::Price::new(1200.0).unwrap());
    }

    #[test]
    fn create_requires_address() {
        assert!(parse(&[
            "create",
            "--landlord",
            "3",
            "--title",
            "Sunny flat",
            "--city",
            "Springfield",
        ])
        .is_err());
    }

    #[test]
    fn parses_update() {
        let Property::Update(update) = parse(&[
            "update",
            "7",
            "--status",
            "maintenance",
            "--clear-postal-code",
        ])
        .unwrap() else {
            panic!("expected `update`");
        };

        assert_eq!(update.id, 7.into());
        assert_eq!(update.status, Some(property::Status::Maintenance));
        assert!(update.clear_postal_code);
        assert!(!update.clear_description);
        assert_eq!(update.title, None);
    }

    #[test]
    fn update_rejects_setting_and_clearing() {
        assert!(parse(&[
            "update",
            "7",
            "--postal-code",
            "12345",
            "--clear-postal-code",
        ])
        .is_err());
    }

    #[test]
    fn parses_media_commands() {
        assert!(matches!(
            parse(&[
                "add-media",
                "7",
                "--kind",
                "video",
                "--url",
                "https://cdn.test/tour.mp4",
            ])
            .unwrap(),
            Property::AddMedia { property_id, kind: media::MediaType::Video, url }
                if property_id == 7.into()
                    && url.to_string() == "https://cdn.test/tour.mp4",
        ));
        assert!(matches!(
            parse(&["remove-media", "4"]).unwrap(),
            Property::RemoveMedia { media_id } if media_id == 4.into(),
        ));
        assert!(parse(&["add-media", "7", "--kind", "audio", "--url", "x"])
            .is_err());
    }

    #[test]
    fn parses_global_config() {
        let args = Args::try_parse_from([
            "application",
            "property",
            "delete",
            "3",
            "--config",
            "prod.toml",
        ])
        .unwrap();

        assert_eq!(args.config, "prod.toml");
        assert!(matches!(
            args.command,
            Command::Property(Property::Delete { id }) if id == 3.into(),
        ));
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Args::try_parse_from([
            "application",
            "property",
            "list",
            "--status",
            "sold",
        ])
        .is_err());
    }

    #[test]
    fn requires_command() {
        assert!(Args::try_parse_from(["application"]).is_err());
    }
}
