use std::error::Error;

use clap::{Parser, Subcommand};
use num_format::{Locale, ToFormattedString};
use simple_logger::SimpleLogger;
use tinytemplate::TinyTemplate;

use ecotrip::*;

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bin/ecotrip_template.md"
));
static TEMPLATE_NAME: &'static str = "t";

const ABOUT: &'static str = r#"Estimates the CO2 emitted by a trip between two Brazilian cities and
the number of trees needed to offset it in one year.

The reference tables shipped with the binary can be replaced by CSV files:
* cities: `name`
* distances: `from,to,km`
* emission factors: `mode,name,kg_co2_per_km`
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// CSV file with the known cities, in display order
    #[arg(long, requires = "distances")]
    cities: Option<String>,
    /// CSV file with the distance between pairs of cities
    #[arg(long, requires = "cities")]
    distances: Option<String>,
    /// CSV file with the emission factor of each transport mode
    #[arg(long)]
    factors: Option<String>,
    /// Number of trees that offset one ton of CO2 in one year
    #[arg(long, default_value_t = TREES_PER_TON)]
    trees_per_ton: f64,
    /// Log debug information
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Computes the footprint of a trip
    Calculate {
        #[arg(short, long)]
        origin: String,
        #[arg(short, long)]
        destination: String,
        /// The transport mode (e.g. `aviao`). See `modes`
        #[arg(short, long)]
        mode: String,
        #[arg(short, long, default_value_t = 1)]
        passengers: u32,
        /// Writes the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Lists the known cities
    Cities {
        /// In alphabetical order
        #[arg(long)]
        sorted: bool,
    },
    /// Lists the known transport modes
    Modes,
    /// Writes the distance table as CSV
    Routes,
}

#[derive(serde::Serialize)]
struct Context {
    origin: String,
    destination: String,
    distance: String,
    mode: String,
    passengers: String,
    emission: String,
    emission_per_passenger: String,
    trees: String,
}

/// Formats `value` with Brazilian thousands separators and 2 decimal places (e.g. `3.672,00`)
fn format_decimal(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{sign}{}{}{:02}",
        (cents / 100).to_formatted_string(&Locale::pt),
        Locale::pt.decimal(),
        cents % 100
    )
}

/// Formats a distance, omitting decimal places when it is a whole number of km
fn format_distance(km: f64) -> String {
    if km.fract() == 0.0 {
        (km as i64).to_formatted_string(&Locale::pt)
    } else {
        format_decimal(km)
    }
}

fn plural(count: u64, word: &str) -> String {
    format!("{count} {word}{}", if count > 1 { "s" } else { "" })
}

fn render(
    request: &TripRequest,
    calculation: &Calculation,
    model: &EmissionModel,
) -> Result<String, Box<dyn Error>> {
    let context = Context {
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        distance: format_distance(calculation.distance),
        mode: model.display_name(&request.mode).to_string(),
        passengers: plural(request.passengers as u64, "passageiro"),
        emission: format_decimal(calculation.emission),
        emission_per_passenger: format_decimal(calculation.emission_per_passenger),
        trees: plural(calculation.trees_needed, "árvore"),
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;

    Ok(tt.render(TEMPLATE_NAME, &context)?)
}

/// The message shown to the user when a calculation is rejected
fn message(error: &CalculationError) -> String {
    match error {
        CalculationError::InvalidInput(_) => {
            "Por favor, preencha todos os campos obrigatórios. O número de passageiros deve ser no mínimo 1.".to_string()
        }
        CalculationError::DegenerateRoute(_) => {
            "A origem e o destino não podem ser a mesma cidade. Escolha cidades diferentes."
                .to_string()
        }
        CalculationError::UnknownRoute {
            origin,
            destination,
        } => format!(
            "Desculpe, não encontramos uma rota entre {origin} e {destination}. Tente outras cidades."
        ),
        CalculationError::UnknownTransportMode(mode) => format!(
            "Meio de transporte \"{mode}\" desconhecido. Verifique o meio de transporte selecionado."
        ),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init()?;

    let routes = match (&cli.cities, &cli.distances) {
        (Some(cities), Some(distances)) => RouteTable::load(cities, distances)?,
        _ => RouteTable::embedded()?,
    };
    let model = match &cli.factors {
        Some(factors) => EmissionModel::load(factors, cli.trees_per_ton)?,
        None => EmissionModel::embedded()?.with_trees_per_ton(cli.trees_per_ton)?,
    };
    let calculator = Calculator::new(&routes, &model);

    match cli.command {
        Command::Calculate {
            origin,
            destination,
            mode,
            passengers,
            json,
        } => {
            let request = TripRequest {
                origin: origin.trim().to_string(),
                destination: destination.trim().to_string(),
                mode: mode.trim().to_string(),
                passengers,
            };
            match calculator.perform_full_calculation(&request) {
                Ok(calculation) if json => {
                    println!("{}", serde_json::to_string_pretty(&calculation)?)
                }
                Ok(calculation) => print!("{}", render(&request, &calculation, &model)?),
                Err(error) => {
                    log::error!("{error}");
                    eprintln!("Erro: {}", message(&error));
                    std::process::exit(1);
                }
            }
        }
        Command::Cities { sorted } => {
            if sorted {
                routes.cities_sorted().iter().for_each(|city| println!("{city}"));
            } else {
                routes.cities().iter().for_each(|city| println!("{city}"));
            }
        }
        Command::Modes => {
            for factor in model.modes() {
                println!(
                    "{}\t{}\t{} kg CO2/km",
                    factor.mode, factor.name, factor.kg_co2_per_km
                );
            }
        }
        Command::Routes => {
            let data = ecotrip::csv::serialize(routes.routes().into_iter())?;
            print!("{}", String::from_utf8(data)?);
        }
    }

    Ok(())
}
