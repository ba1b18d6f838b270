use anyhow::Context;
use clap::Parser;
use country_lookup::app::render::render_state;
use country_lookup::utils::error::ErrorSeverity;
use country_lookup::utils::{logger, validation::Validate};
use country_lookup::{
    ApiConfig, CliConfig, CountryLookupWorkflow, LookupError, LookupState, RestCountriesClient,
};
use tokio::io::{AsyncBufReadExt, BufReader};

type Workflow = CountryLookupWorkflow<RestCountriesClient<ApiConfig>>;

fn exit_code(e: &LookupError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: &LookupError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

fn print_state(state: &LookupState, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(state).context("serializing state")?
        );
    } else {
        println!("{}", render_state(state));
    }
    Ok(())
}

async fn run_once(workflow: &Workflow, cli: &CliConfig, country: &str) -> anyhow::Result<()> {
    workflow.set_query_text(country);
    workflow.submit_current_query().await;

    if let Some(code) = &cli.select {
        if let Err(e) = workflow.select_neighbor_by_code(code) {
            tracing::warn!("{}", e);
            eprintln!("⚠️ {}", e.user_friendly_message());
        }
    }

    let state = workflow.snapshot();
    print_state(&state, cli.json)?;

    if state.error.is_some() {
        std::process::exit(exit_code(&LookupError::NotFoundError {
            query: country.to_string(),
        }));
    }
    Ok(())
}

async fn run_interactive(workflow: &Workflow, json: bool) -> anyhow::Result<()> {
    // Renderer: prints every settled snapshot published by the workflow.
    let mut updates = workflow.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if state.phase.is_settled() {
                if let Err(e) = print_state(&state, json) {
                    tracing::error!("Failed to render state: {}", e);
                }
            }
        }
    });

    println!("Información de Países");
    println!("Introduce el nombre de un país (:select CODE, :state, :quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        match line.split_once(' ').map_or((line, ""), |(cmd, arg)| (cmd, arg.trim())) {
            (":quit", _) | (":q", _) => break,
            (":state", _) => print_state(&workflow.snapshot(), json)?,
            (":select", code) => {
                if let Err(e) = workflow.select_neighbor_by_code(code) {
                    eprintln!("⚠️ {}", e.user_friendly_message());
                }
            }
            _ => {
                workflow.set_query_text(line);
                workflow.submit_current_query().await;
            }
        }
        // Let the renderer drain the update before the next prompt.
        tokio::task::yield_now().await;
    }

    renderer.abort();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file = match cli.load_file() {
        Ok(file) => file,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None);
            fail(&e);
        }
    };
    let log_level = file.as_ref().and_then(|f| f.log_level());
    if cli.log_json {
        logger::init_json_logger(cli.verbose, log_level);
    } else {
        logger::init_cli_logger(cli.verbose, log_level);
    }

    tracing::info!("Starting country-lookup");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let api_config = cli.resolve(file.as_ref());
    let validation = cli.validate().and_then(|_| api_config.validate());
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let client = match RestCountriesClient::new(api_config) {
        Ok(client) => client,
        Err(e) => fail(&e),
    };
    let workflow = CountryLookupWorkflow::new(client);

    match cli.country.as_deref() {
        Some(country) => run_once(&workflow, &cli, country).await,
        None => run_interactive(&workflow, cli.json).await,
    }
}
