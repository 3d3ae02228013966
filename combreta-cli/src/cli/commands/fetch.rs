use crate::cli::Settings;
use crate::download::EntrezClient;
use crate::pipeline::report::{print_fetch_report, write_metadata, write_summary_csv};
use crate::pipeline::Fetcher;
use anyhow::Result;
use clap::Args;
use combreta_core::generate_timestamp;
use combreta_utils::{create_progress_bar, info, section_header, success};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args)]
pub struct FetchArgs {
    /// Directory for raw FASTA downloads [default: sequences_raw]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Contact e-mail sent to NCBI with every request
    #[arg(long, env = "NCBI_EMAIL")]
    pub email: Option<String>,

    /// NCBI API key (raises the request rate limit)
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Maximum records requested per search
    #[arg(long)]
    pub retmax: Option<usize>,

    /// Pause between requests in milliseconds [default: 350 with an API key, 500 without]
    #[arg(long, value_name = "MS")]
    pub pause_ms: Option<u64>,
}

pub fn run(args: FetchArgs, settings: &Settings) -> Result<()> {
    let mut entrez = settings.config.entrez.clone();
    if args.email.is_some() {
        entrez.email = args.email;
    }
    if args.api_key.is_some() {
        entrez.api_key = args.api_key;
    }
    if let Some(retmax) = args.retmax {
        entrez.retmax = retmax;
    }
    if args.pause_ms.is_some() {
        entrez.pause_ms = args.pause_ms;
    }

    let client = EntrezClient::new(&entrez)?;
    let catalog = &settings.catalog;
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&settings.config.paths.raw_dir));

    let started = generate_timestamp();
    let clock = Instant::now();

    section_header("Combretaceae phylogeny sequence download");
    info(&format!(
        "{} species x {} markers = {} combinations",
        catalog.species.len(),
        catalog.markers.len(),
        catalog.pair_count()
    ));
    info(&format!("Started: {}", started));
    if settings.is_verbose() {
        info(&format!(
            "Pause {} ms, retmax {}",
            entrez.pause().as_millis(),
            entrez.retmax
        ));
    }

    let fetcher = Fetcher::new(&client, catalog, &output_dir)
        .with_retmax(entrez.retmax)
        .with_pause(entrez.pause());

    let progress = create_progress_bar(catalog.pair_count() as u64, "Downloading");
    let records = fetcher.run(&progress)?;
    progress.finish_and_clear();

    if settings.is_verbose() {
        for path in records.iter().filter_map(|r| r.file.as_ref()) {
            info(&format!("Wrote {}", path.display()));
        }
    }
    print_fetch_report(&records, catalog, clock.elapsed().as_secs());

    let email = entrez.email.as_deref().unwrap_or_default();
    let csv_path = write_summary_csv(fetcher.output_dir(), &records)?;
    let metadata_path = write_metadata(fetcher.output_dir(), catalog, &started, email)?;

    success(&format!("Summary CSV: {}", csv_path.display()));
    success(&format!("Metadata: {}", metadata_path.display()));
    info(&format!("Raw sequences in {}", output_dir.display()));
    Ok(())
}
