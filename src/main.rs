// Noticeboard - shared announcement board
// Main entry point for iced application

use std::sync::Arc;

use iced::{Application, Settings as IcedSettings};
use log::{error, info};

use noticeboard::command_handlers::KeyGenerator;
use noticeboard::utils::generate_document_key;
use noticeboard::utils::logging::init_logging;
use noticeboard::utils::retry::RetryConfig;
use noticeboard::{AppConfig, AppFlags, Database, DocumentStore, NoticeboardApp, SubscriptionOptions};

#[tokio::main]
async fn main() -> iced::Result {
    init_logging();

    info!("Starting Noticeboard");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn DocumentStore> = match Database::new(&config).await {
        Ok(database) => Arc::new(database),
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            eprintln!("Failed to initialize database: {}", e);
            eprintln!("Please check {} and try again.", config.db_path.display());
            std::process::exit(1);
        }
    };

    let key_generator: KeyGenerator = Arc::new(generate_document_key);

    NoticeboardApp::run(IcedSettings {
        flags: AppFlags {
            store,
            key_generator,
            subscription: SubscriptionOptions {
                poll_interval: config.poll_interval,
                retry: RetryConfig::default(),
            },
        },
        window: iced::window::Settings {
            size: iced::Size::new(720.0, 640.0),
            resizable: true,
            ..Default::default()
        },
        id: None,
        fonts: vec![],
        default_font: Default::default(),
        default_text_size: iced::Pixels(16.0),
        antialiasing: false,
    })
}
