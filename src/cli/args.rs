use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::clock::{parse_local_datetime, Clock, FixedClock, SystemClock};
use crate::models::{LocationListQuery, PhotoListQuery, PhotoSearchQuery};
use crate::validate;

/// Default bind address for `serve`.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Top-level CLI entrypoint for `alemassas`.
#[derive(Parser, Debug)]
#[command(
    name = "alemassas",
    about = "Ale Massas site API: HTTP server and query CLI",
    author = "alemassas developers",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    /// JSON data file replacing the built-in gallery and location data.
    #[arg(long = "data", global = true, env = "ALEMASSAS_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP+JSON API server.
    Serve(ServeArgs),
    /// List gallery categories.
    Categories(CategoriesArgs),
    /// List gallery photos, optionally filtered by category.
    Photos(PhotosArgs),
    /// Show one photo.
    Photo(PhotoArgs),
    /// Search photos by text and date range.
    SearchPhotos(SearchPhotosArgs),
    /// List restaurant locations.
    Locations(LocationsArgs),
    /// Show one location with hours, phones and services.
    Location(LocationArgs),
}

/// CLI representation of output format.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Output and execution options shared by every query subcommand.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format (text or json).
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Optional server URL for delegating the query to a running
    /// `alemassas serve` instance.
    ///
    /// When set (either via this flag or the `ALEMASSAS_SERVER_URL`
    /// environment variable), the CLI sends the query to the HTTP API
    /// instead of reading the local data. Use `--no-server` to force
    /// local execution.
    #[arg(long = "server", env = "ALEMASSAS_SERVER_URL")]
    pub server: Option<String>,

    /// Disable use of any configured server and run the query locally.
    #[arg(long = "no-server")]
    pub no_server: bool,
}

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct PhotosArgs {
    /// Only list photos in this category.
    #[arg(long = "category")]
    pub category: Option<i64>,

    /// 1-based page number (default 1).
    #[arg(long = "page")]
    pub page: Option<i64>,

    /// Photos per page (default and maximum 30).
    #[arg(long = "page-size")]
    pub page_size: Option<i64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct PhotoArgs {
    /// Photo id.
    pub id: i64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct SearchPhotosArgs {
    /// Text matched against photo titles and descriptions
    /// (3 to 50 characters, case-insensitive).
    #[arg(long = "term")]
    pub term: Option<String>,

    /// Earliest photo date, inclusive (YYYY-MM-DD).
    #[arg(long = "from")]
    pub from: Option<String>,

    /// Latest photo date, inclusive (YYYY-MM-DD).
    #[arg(long = "to")]
    pub to: Option<String>,

    /// 1-based page number (default 1).
    #[arg(long = "page")]
    pub page: Option<i64>,

    /// Photos per page (default and maximum 30).
    #[arg(long = "page-size")]
    pub page_size: Option<i64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct LocationsArgs {
    /// Keep locations whose address mentions this region.
    #[arg(long = "region")]
    pub region: Option<String>,

    /// Keep locations whose address mentions this district.
    #[arg(long = "district")]
    pub district: Option<String>,

    /// Your latitude; with `--lon`, results carry distances and are
    /// sorted nearest first.
    #[arg(long = "lat", allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Your longitude.
    #[arg(long = "lon", allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Evaluate opening hours at this local time (YYYY-MM-DDTHH:MM)
    /// instead of now. Only valid for local execution.
    #[arg(long = "at")]
    pub at: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct LocationArgs {
    /// Location id.
    pub id: i64,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments specific to the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to, e.g. "127.0.0.1:3000".
    #[arg(long = "addr", default_value = DEFAULT_ADDR)]
    pub addr: String,
}

/// Build a validated `PhotoListQuery` from CLI `PhotosArgs`.
pub fn photo_list_query_from_args(args: &PhotosArgs) -> Result<PhotoListQuery> {
    Ok(validate::photo_list_query(
        args.category,
        args.page,
        args.page_size,
    )?)
}

/// Build a validated `PhotoSearchQuery` from CLI `SearchPhotosArgs`.
pub fn photo_search_query_from_args(args: &SearchPhotosArgs) -> Result<PhotoSearchQuery> {
    Ok(validate::photo_search_query(
        args.term.clone(),
        args.from.clone(),
        args.to.clone(),
        args.page,
        args.page_size,
    )?)
}

/// Build a `LocationListQuery` from CLI `LocationsArgs`.
pub fn location_list_query_from_args(args: &LocationsArgs) -> Result<LocationListQuery> {
    for (flag, value) in [("--lat", args.lat), ("--lon", args.lon)] {
        if value.is_some_and(|v| !v.is_finite()) {
            bail!("{flag} must be a finite number");
        }
    }

    Ok(LocationListQuery {
        region: args.region.clone().filter(|r| !r.is_empty()),
        district: args.district.clone().filter(|d| !d.is_empty()),
        latitude: args.lat,
        longitude: args.lon,
    })
}

/// Clock for local `locations` queries: pinned by `--at`, otherwise the
/// system clock.
pub fn clock_from_args(args: &LocationsArgs) -> Result<Box<dyn Clock>> {
    match &args.at {
        Some(at) => Ok(Box::new(FixedClock(parse_local_datetime(at)?))),
        None => Ok(Box::new(SystemClock::new())),
    }
}

/// Validate a positional resource id.
pub fn id_from_arg(id: i64) -> Result<u32> {
    Ok(validate::resource_id("id", id)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> OutputArgs {
        OutputArgs {
            format: OutputFormat::Text,
            server: None,
            no_server: false,
        }
    }

    #[test]
    fn photos_args_default_to_first_page() {
        let args = PhotosArgs {
            category: None,
            page: None,
            page_size: None,
            output: output(),
        };

        let query = photo_list_query_from_args(&args).expect("query");
        assert_eq!(query.category_id, None);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 30);
    }

    #[test]
    fn photos_args_are_validated() {
        let args = PhotosArgs {
            category: Some(2),
            page: Some(1),
            page_size: Some(40),
            output: output(),
        };

        let err = photo_list_query_from_args(&args).expect_err("page size too large");
        assert!(err.to_string().contains("pageSize"));
    }

    #[test]
    fn search_args_reject_inverted_range() {
        let args = SearchPhotosArgs {
            term: Some("massa".to_string()),
            from: Some("2024-02-01".to_string()),
            to: Some("2024-01-01".to_string()),
            page: None,
            page_size: None,
            output: output(),
        };

        let err = photo_search_query_from_args(&args).expect_err("inverted range");
        assert_eq!(err.to_string(), "End date cannot be before start date");
    }

    #[test]
    fn locations_args_map_to_query() {
        let args = LocationsArgs {
            region: Some("São Paulo".to_string()),
            district: Some(String::new()),
            lat: Some(-23.5),
            lon: Some(-46.6),
            at: Some("2024-01-15T12:00".to_string()),
            output: output(),
        };

        let query = location_list_query_from_args(&args).expect("query");
        assert_eq!(query.region.as_deref(), Some("São Paulo"));
        assert_eq!(query.district, None);
        assert_eq!(query.latitude, Some(-23.5));
        assert_eq!(query.longitude, Some(-46.6));

        let clock = clock_from_args(&args).expect("clock");
        assert_eq!(clock.now(), time::macros::datetime!(2024-01-15 12:00));
    }

    #[test]
    fn cli_parses_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "alemassas",
            "locations",
            "--lat",
            "-23.56",
            "--lon",
            "-46.65",
        ])
        .expect("parse");

        match cli.command {
            Some(Commands::Locations(args)) => {
                assert_eq!(args.lat, Some(-23.56));
                assert_eq!(args.lon, Some(-46.65));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn latitude_requires_longitude() {
        let result = Cli::try_parse_from(["alemassas", "locations", "--lat", "-23.56"]);
        assert!(result.is_err());
    }

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(id_from_arg(4).expect("id"), 4);
        assert!(id_from_arg(0).is_err());
    }
}
