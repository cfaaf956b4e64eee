use clap::Parser;
use homam_booking::core::filter::FilterState;
use homam_booking::core::Catalog;
use homam_booking::domain::model::{BookingConfirmation, PriceBreakdown};
use homam_booking::utils::error::ErrorSeverity;
use homam_booking::utils::logger::{self, LogFormat};
use homam_booking::utils::validation::Validate;
use homam_booking::{
    AppConfig, BookingEngine, BookingError, BookingRequest, CliConfig, Command, HistoryNavigator,
    SimulatedGateway, StaticCatalog,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    // 初始化日誌
    let verbose = cli.verbose || config.logging.verbose;
    let format = if cli.json_logs || config.logging.json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, verbose);

    tracing::info!("🚀 Starting homam-booking");
    if verbose {
        tracing::debug!("CLI args: {:?}", cli);
        tracing::debug!("App config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    if let Err(e) = run(cli, config).await {
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(e: &BookingError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

async fn run(cli: CliConfig, config: AppConfig) -> homam_booking::Result<()> {
    let catalog = match config.catalog_path() {
        Some(path) => StaticCatalog::from_file(path)?,
        None => StaticCatalog::builtin()?,
    };

    match cli.command {
        Command::Services => {
            for service in catalog.list_services() {
                println!(
                    "{:<22} ₹{:<7} {:<10} {}",
                    service.id, service.price, service.duration, service.name
                );
            }
        }
        Command::Service { id } => {
            let service = catalog.get_service(&id)?;
            println!("{} ({})", service.name, service.duration);
            println!("₹{}", service.price);
            if let Some(performed_by) = &service.performed_by {
                println!("Performed by {}", performed_by);
            }
            println!("\n{}\n", service.description);
            println!("Purpose: {}", service.purpose);
            println!("When performed: {}", service.when_performed);
            println!("Benefits:");
            for benefit in &service.benefits {
                println!("  • {}", benefit);
            }
        }
        Command::Priests {
            search,
            language,
            min_experience,
            min_rating,
            date,
        } => {
            let mut filters = FilterState::default();
            filters.set_search(&search);
            filters.set_language(&language);
            filters.set_min_experience(&min_experience)?;
            filters.set_min_rating(&min_rating)?;

            let priests = homam_booking::core::filter::filter_priests(catalog.list_priests(), &filters);
            let noun = if priests.len() == 1 { "priest" } else { "priests" };
            println!("{} {} available", priests.len(), noun);
            for priest in priests {
                let availability = match date {
                    Some(date) if priest.is_available_on(date) => " (available)",
                    Some(_) => " (not available)",
                    None => "",
                };
                println!(
                    "{:<10} ★{:.1} {:>2}y ₹{:<6} {}{} [{}]",
                    priest.id,
                    priest.rating,
                    priest.experience,
                    priest.price,
                    priest.name,
                    availability,
                    priest.languages.join(", ")
                );
            }
            if filters.has_active_filters() {
                let languages: Vec<String> =
                    homam_booking::core::filter::available_languages(catalog.list_priests())
                        .into_iter()
                        .collect();
                println!("Languages: {}", languages.join(", "));
            }
        }
        Command::Book {
            request,
            coupon,
            dry_run,
        } => {
            tracing::info!("📁 Loading booking request from: {}", request.display());
            let request = BookingRequest::from_file(&request)?;
            request.validate()?;
            book(catalog, &config, request, coupon, dry_run).await?;
        }
    }

    Ok(())
}

async fn book(
    catalog: StaticCatalog,
    config: &AppConfig,
    request: BookingRequest,
    coupon: Option<String>,
    dry_run: bool,
) -> homam_booking::Result<()> {
    let navigator = Arc::new(HistoryNavigator::new());
    let gateway = Arc::new(SimulatedGateway::new(config.simulation.payment_delay()));

    let mut engine = BookingEngine::builder(Arc::new(catalog), gateway)
        .simulation(config.simulation.clone())
        .navigator(navigator.clone())
        .open(&request.service_id)
        .await?;

    engine.submit_details(request.details)?;
    engine.select_priest(&request.priest_id)?;

    if let Some(code) = coupon.or(request.coupon) {
        // 優惠碼錯誤不影響付款
        engine.try_coupon(&code);
    }

    let breakdown = engine.price_breakdown()?;
    print_breakdown(&breakdown);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - payment skipped");
        return Ok(());
    }

    let confirmation = engine.pay().await?;
    print_confirmation(&confirmation);
    tracing::debug!("Navigation history: {:?}", navigator.entries());
    Ok(())
}

fn print_breakdown(breakdown: &PriceBreakdown) {
    println!("Service fee:   ₹{}", breakdown.subtotal);
    println!("Priest fee:    ₹{}", breakdown.officiant_fee);
    println!("Platform fee:  ₹{}", breakdown.platform_fee);
    if breakdown.discount > 0 {
        println!("Discount:     -₹{}", breakdown.discount);
    }
    println!("Total:         ₹{}", breakdown.total);
}

fn print_confirmation(confirmation: &BookingConfirmation) {
    println!("✅ Payment Successful!");
    println!("Booking Reference: {}", confirmation.reference);
    println!(
        "{} with {} on {} at {}",
        confirmation.service_name,
        confirmation.priest_name,
        confirmation
            .booking
            .date
            .map(|d| d.format("%A, %B %-d, %Y").to_string())
            .unwrap_or_default(),
        confirmation
            .booking
            .time
            .map(|t| t.to_string())
            .unwrap_or_default()
    );
}
