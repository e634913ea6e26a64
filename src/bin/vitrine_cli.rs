use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use vitrine::schema::consistency;
use vitrine::validation::types::AttrMap;
use vitrine::{
    CategoryType, FieldRegistry, SchemaStore, Settings, ValidationResult, Validator,
    VehicleCatalog, VitrineError, VitrineResult,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = "config/vitrine.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a specifics payload file against a category
    Validate {
        /// Category slug (e.g. transport-cars, real-estate-apartments)
        #[arg(long)]
        category: String,
        /// Path to the JSON payload (a flat key->value object)
        #[arg(required = true)]
        input: PathBuf,
    },
    /// Print the rendered form for a category as JSON
    Schema {
        /// Category slug
        #[arg(long)]
        category: String,
        /// Locale code for the rendered tree
        #[arg(long)]
        locale: Option<String>,
    },
    /// Run the schema/validator consistency lint
    Lint {},
}

struct Engine {
    registry: FieldRegistry,
    schemas: SchemaStore,
    vehicles: VehicleCatalog,
    settings: Settings,
}

fn load_engine(config: &PathBuf) -> VitrineResult<Engine> {
    let settings = Settings::load_or_default(config)
        .map_err(|e| VitrineError::Config(e.to_string()))?;

    let mut registry = FieldRegistry::builtin();
    if let Some(path) = &settings.catalog_fields_file {
        let raw = fs::read_to_string(path)?;
        let merged = registry.merge_json(&raw)?;
        info!("merged {} field definitions from {}", merged, path.display());
    }

    let mut schemas = SchemaStore::builtin();
    if let Some(path) = &settings.schema_file {
        let raw = fs::read_to_string(path)?;
        let merged = schemas.merge_json(&raw)?;
        info!("merged {} category schemas from {}", merged, path.display());
    }

    let vehicles = match &settings.vehicle_data_file {
        Some(path) => VehicleCatalog::load_from_file(path)?,
        None => VehicleCatalog::builtin().clone(),
    };

    Ok(Engine {
        registry,
        schemas,
        vehicles,
        settings,
    })
}

fn run(cli: Cli) -> VitrineResult<bool> {
    let engine = load_engine(&cli.config)?;

    match cli.command {
        Commands::Validate { category, input } => {
            let category = CategoryType::classify(&category);
            let raw = fs::read_to_string(&input)?;
            let payload: AttrMap = serde_json::from_str(&raw)?;

            let validator = Validator::new(&engine.registry, &engine.vehicles);
            match validator.validate(category, &payload)? {
                ValidationResult::Valid(specifics) => {
                    println!("{}", serde_json::to_string_pretty(&specifics)?);
                    Ok(true)
                }
                ValidationResult::Invalid(errors) => {
                    println!("{}", serde_json::to_string_pretty(&errors)?);
                    Ok(false)
                }
            }
        }
        Commands::Schema { category, locale } => {
            let category_type = CategoryType::classify(&category);
            let locale = locale.unwrap_or_else(|| engine.settings.default_locale.clone());
            match engine.schemas.get(category_type) {
                Some(schema) => {
                    let form = vitrine::render(
                        &engine.registry,
                        schema,
                        category_type,
                        &AttrMap::new(),
                        &locale,
                    );
                    println!("{}", serde_json::to_string_pretty(&form)?);
                    Ok(true)
                }
                None => {
                    error!("no schema for category '{}' ({})", category, category_type);
                    Ok(false)
                }
            }
        }
        Commands::Lint {} => {
            let warnings = consistency::check(&engine.registry, &engine.schemas);
            if warnings.is_empty() {
                info!("schemas and validators are consistent");
                Ok(true)
            } else {
                for warning in &warnings {
                    println!("{}", warning);
                }
                Ok(false)
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
