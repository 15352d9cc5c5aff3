use cert_lookup::domain::model::{LookupResult, NormalizedCertification, ResolvedImage};
use cert_lookup::domain::ports::{ConfigProvider, RequestCounter};
use cert_lookup::utils::{logger, validation::Validate};
use cert_lookup::{
    CliConfig, FileCounter, HttpRegistryClient, ImageResolver, LookupEngine, WebhookNotifier,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cert-lookup CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let counter = FileCounter::new(config.counter_file());

    if config.count {
        println!("Total number of requests: {}", counter.read().await);
        return Ok(());
    }

    let cert_id = match config.cert_id.clone() {
        Some(id) => id,
        None => {
            eprintln!("❌ Certification Number missing!");
            std::process::exit(1);
        }
    };

    let api = HttpRegistryClient::new(config.registry_base_url(), config.user_agent());
    let notifier = WebhookNotifier::new(config.webhook_url.clone());
    let images = ImageResolver::new(config.user_agent());
    let engine = LookupEngine::new(api, counter, notifier, images);

    match engine.lookup(&cert_id, &config.requester).await {
        Ok(LookupResult::Success {
            record,
            image,
            request_number,
        }) => {
            render_record(&record, &image, request_number);
        }
        Ok(LookupResult::Failure(failure)) => {
            eprintln!(
                "❌ Your request was not successful. Error code: {}",
                failure.status_code()
            );
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!("Lookup failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Plain-text rendering of the normalized certificate.
fn render_record(record: &NormalizedCertification, image: &ResolvedImage, request_number: u64) {
    println!("{} | {}", record.game.name, record.game.platforms);
    println!("Certification Number: {}", record.label);
    println!("Grading Date:         {}", record.grading_date);
    println!("Title:                {}", record.game.name);
    println!("Year:                 {}", record.game.year);
    println!("System:               {}", record.game.platforms);
    println!("Country of Release:   {}", record.region);
    println!("Publisher:            {}", record.game.publisher);
    println!("Overall Grade:        {}", record.grade.overall_grade);
    println!("Box Grade:            {}", record.grade.box_grade);
    println!("Seal Grade:           {}", record.grade.seal);

    if let (Some(instruction), Some(cartridge)) =
        (&record.grade.instruction, &record.grade.cartridge)
    {
        println!("Manual:               {}", instruction);
        println!("Cart:                 {}", cartridge);
    }

    if let Some(variants) = &record.grade.variants {
        println!("Variants:");
        for variant in variants {
            println!("  {}", variant);
        }
    }

    if let Some(notes) = &record.grade.notes {
        println!("Notes: {}", notes);
    }

    match (&image.bytes, &image.anomaly) {
        (Some(bytes), _) => println!("Image: {} bytes", bytes.len()),
        (None, Some(anomaly)) => println!("Image: none ({})", anomaly),
        (None, None) => {}
    }

    println!("Request Nr. {}", request_number);
}
