use std::path::PathBuf;
use std::process;

use chrono::{
    Datelike,
    Utc
};
use clap::{
    Parser,
    ValueEnum
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use holidayservice::configuration::{
    Configuration,
    ConfigurationError
};
use holidayservice::holiday::region::Region;
use holidayservice::view::holidaylistmodel::{
    HolidayListModel,
    HolidayRow
};
use holidayservice::view::localization::Language;

#[derive(Clone, Copy, ValueEnum)]
enum RegionArg {
    HongKong,
    Mainland
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Region {
        match arg {
            RegionArg::HongKong => Region::HongKong,
            RegionArg::Mainland => Region::Mainland
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    Sc,
    Tc,
    En
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Language {
        match arg {
            LanguageArg::Sc => Language::SimplifiedChinese,
            LanguageArg::Tc => Language::TraditionalChinese,
            LanguageArg::En => Language::English
        }
    }
}

/// Lists Hong Kong and Mainland public holidays for a year.
#[derive(Parser)]
#[command(name = "holidayservice", version)]
struct Cli {
    /// JSON configuration file; bundled data is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Year to list, defaults to the current year
    #[arg(short, long)]
    year: Option<i32>,

    /// Only show one region
    #[arg(short, long, value_enum)]
    region: Option<RegionArg>,

    #[arg(short, long, value_enum, default_value = "sc")]
    language: LanguageArg,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(cli: Cli) -> Result<(), ConfigurationError> {
    let configuration = match &cli.config {
        Some(path) => Configuration::from_reader(path)?,
        None => Configuration::new()
    };
    let service = configuration.build_service();
    let today = cli.region.map_or(Region::HongKong, Region::from).local_date(Utc::now());
    let year = cli.year.unwrap_or(today.year());
    let language = Language::from(cli.language);

    info!(year, supported = ?service.supported_years(), "listing holidays");
    if !service.is_year_supported(year) {
        println!(
            "{} is outside the supported range {}-{}",
            year,
            service.supported_years().start(),
            service.supported_years().end()
        );
        return Ok(());
    }

    let mut model = HolidayListModel::new(&service, year, language);
    model.toggle_region(cli.region.map(Region::from));

    for section in model.sections() {
        if section.rows.is_empty() {
            continue;
        }
        println!("{}", section.label);
        for row in &section.rows {
            let days_until = model.days_until(row, today).text(language);
            match row {
                HolidayRow::Single(holiday) => println!(
                    "  {}  {}  [{}]  {}  {}",
                    holiday.start_date(),
                    holiday.name(),
                    language.region_name(holiday.region()),
                    language.duration_text(holiday.duration_days()),
                    days_until
                ),
                HolidayRow::MultiRegion { .. } => println!(
                    "  {}  {}  {}",
                    row.start_date(),
                    row.title(language),
                    days_until
                )
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli) {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}
