use std::error::Error;
use std::path::PathBuf;
use tracing::info;

use data_assets::asset::AssetCatalog;
use data_assets::conf::load_conf_file;
use data_assets::dataset::{Dataset, Split};
use data_assets::storage::config::DEFAULT_CONF_FILE;
use data_assets::storage::env::load_dotenv;
use data_assets::storage::{ConnectorFactory, ProjectPaths};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Data Assets");

    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
    load_dotenv(&environment);

    let paths = ProjectPaths::from_current_dir()?;
    let conf_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.conf_file(DEFAULT_CONF_FILE));
    let conf = load_conf_file(&conf_path)?;
    let catalog = AssetCatalog::from_conf(&conf)?;
    info!(
        "Loaded sources={} and sinks={} from {}",
        catalog.sources.len(),
        catalog.sinks.len(),
        conf_path.display()
    );

    let factory = ConnectorFactory::from_env(paths);

    for (position, source) in catalog.sources.iter().enumerate() {
        let mut dataset = Dataset::from_asset(&factory, source)?;
        let rows = dataset.read().await?.height();
        info!("Source={} rows={}", source.name, rows);

        let metadata = dataset.metadata()?;
        for (group, columns) in metadata.to_map() {
            info!("  {}: {:?}", group, columns);
        }
        if !metadata.splits.is_empty() {
            for split in Split::ALL {
                let subset = dataset.get_subset(&[split])?;
                info!("  split={} rows={}", split, subset.data()?.height());
            }
        }

        if let Some(sink) = catalog.sinks.get(position) {
            let mut frame = dataset.data()?.clone();
            Dataset::from_asset(&factory, sink)?
                .write(&mut frame)
                .await?;
        }
    }

    info!("Finished processing {} sources", catalog.sources.len());
    Ok(())
}
