use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};

use crate::clock::SystemClock;
use crate::logging;
use crate::query;
use crate::server::{self, AppState};
use crate::store::{open_store, MemoryStore};

mod args;
mod config;
mod format;
mod http_backend;

pub use args::{
    CategoriesArgs, Cli, Commands, LocationArgs, LocationsArgs, OutputArgs, OutputFormat,
    PhotoArgs, PhotosArgs, SearchPhotosArgs, ServeArgs,
};

use config::{
    apply_output_config_defaults, apply_serve_config_defaults, effective_data_path,
    load_cli_config, CliConfig,
};
use http_backend::HttpSiteBackend;

/// Entry point for the CLI binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Some(Commands::Serve(_)) => logging::SERVER_DEFAULT_FILTER,
        _ => logging::CLI_DEFAULT_FILTER,
    };
    logging::init(default_filter);

    let cli_config = load_cli_config()?;
    let data_path = effective_data_path(cli.data, cli_config.as_ref());

    match cli.command {
        Some(Commands::Serve(mut serve_args)) => {
            if let Some(ref config) = cli_config {
                apply_serve_config_defaults(config, &mut serve_args);
            }

            let addr: SocketAddr = serve_args
                .addr
                .parse()
                .with_context(|| format!("invalid listen address {:?}", serve_args.addr))?;

            let store = open_store(data_path.as_deref())?;
            // Reads the local offset, so it must run before the runtime
            // spawns worker threads.
            let clock = SystemClock::new();
            let state = AppState::new(Arc::new(store), Arc::new(clock));

            println!("Starting alemassas HTTP server on http://{addr}");

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            runtime.block_on(server::run(addr, state))?;
            Ok(())
        }
        Some(Commands::Categories(mut args)) => {
            prepare_output(cli_config.as_ref(), &mut args.output);

            let categories = match remote_backend(&args.output)? {
                Some(backend) => backend.categories()?,
                None => query::list_categories(&local_store(&data_path)?),
            };

            match args.output.format {
                OutputFormat::Text => format::print_categories(&categories),
                OutputFormat::Json => format::print_json(&categories),
            }
        }
        Some(Commands::Photos(mut args)) => {
            prepare_output(cli_config.as_ref(), &mut args.output);

            let request = args::photo_list_query_from_args(&args)?;
            let page = match remote_backend(&args.output)? {
                Some(backend) => backend.photos(&request)?,
                None => query::list_photos(&local_store(&data_path)?, &request),
            };

            match args.output.format {
                OutputFormat::Text => format::print_photo_page(&page, request.page),
                OutputFormat::Json => format::print_json(&page),
            }
        }
        Some(Commands::Photo(mut args)) => {
            prepare_output(cli_config.as_ref(), &mut args.output);

            let id = args::id_from_arg(args.id)?;
            let photo = match remote_backend(&args.output)? {
                Some(backend) => backend.photo(id)?,
                None => query::get_photo(&local_store(&data_path)?, id),
            };

            let Some(photo) = photo else {
                bail!("photo {id} not found");
            };

            match args.output.format {
                OutputFormat::Text => format::print_photo(&photo),
                OutputFormat::Json => format::print_json(&photo),
            }
        }
        Some(Commands::SearchPhotos(mut args)) => {
            prepare_output(cli_config.as_ref(), &mut args.output);

            let request = args::photo_search_query_from_args(&args)?;
            let page = match remote_backend(&args.output)? {
                Some(backend) => backend.search_photos(&request)?,
                None => query::search_photos(&local_store(&data_path)?, &request),
            };

            match args.output.format {
                OutputFormat::Text => format::print_photo_page(&page, request.page),
                OutputFormat::Json => format::print_json(&page),
            }
        }
        Some(Commands::Locations(mut args)) => {
            prepare_output(cli_config.as_ref(), &mut args.output);

            let request = args::location_list_query_from_args(&args)?;
            let locations = match remote_backend(&args.output)? {
                Some(backend) => {
                    if args.at.is_some() {
                        bail!("--at is only supported for local queries; pass --no-server");
                    }
                    backend.locations(&request)?
                }
                None => {
                    let clock = args::clock_from_args(&args)?;
                    query::list_locations(&local_store(&data_path)?, clock.as_ref(), &request)
                }
            };

            match args.output.format {
                OutputFormat::Text => format::print_locations(&locations),
                OutputFormat::Json => format::print_json(&locations),
            }
        }
        Some(Commands::Location(mut args)) => {
            prepare_output(cli_config.as_ref(), &mut args.output);

            let id = args::id_from_arg(args.id)?;
            let location = match remote_backend(&args.output)? {
                Some(backend) => backend.location(id)?,
                None => query::get_location(&local_store(&data_path)?, id),
            };

            let Some(location) = location else {
                bail!("location {id} not found");
            };

            match args.output.format {
                OutputFormat::Text => format::print_location(&location),
                OutputFormat::Json => format::print_json(&location),
            }
        }
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

fn prepare_output(config: Option<&CliConfig>, output: &mut OutputArgs) {
    if let Some(config) = config {
        apply_output_config_defaults(config, output);
    }
}

fn local_store(data_path: &Option<PathBuf>) -> Result<MemoryStore> {
    open_store(data_path.as_deref())
}

fn remote_backend(output: &OutputArgs) -> Result<Option<HttpSiteBackend>> {
    effective_server_url(output.server.as_deref(), output.no_server)
        .map(HttpSiteBackend::new)
        .transpose()
}

fn effective_server_url(server_flag: Option<&str>, no_server: bool) -> Option<String> {
    if no_server {
        None
    } else {
        server_flag.map(|s| s.to_string())
    }
}
