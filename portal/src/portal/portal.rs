use std::sync::Arc;
use std::time::Duration;
use actix_web::{web, App, HttpServer};
use tokio::sync::RwLock;
use tokio::time::sleep;
use crate::detector::annotator::Annotator;
use crate::detector::detector::Detector;
use crate::inference::hosted_client::HostedClient;
use crate::inference::inference_client::InferenceClient;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::web::api::{config, default, detect, log, message};

pub struct Portal;

impl Portal {
    pub async fn run(config_path: &str) {
        logging_information!(SystemEntry::Initializing);
        let config = match Config::load(config_path).await {
            Ok(config) => config,
            Err(entry) => {
                logging_entry!(entry);
                return;
            },
        };
        let client: Arc<dyn InferenceClient> = match HostedClient::new(&config) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                logging_emergency!(SystemEntry::ClientBuildError(err.to_string()));
                return;
            },
        };
        let font = match Annotator::load_font(&config.font_path).await {
            Ok(font) => Some(font),
            Err(err) => {
                logging_warning!(SystemEntry::FontUnavailable(err));
                None
            },
        };
        let port = config.http_server_bind_port;
        let bind_retry_duration = Duration::from_secs(config.bind_retry_duration);
        let detector = web::Data::new(Detector::new(client, font));
        let shared_config = web::Data::new(RwLock::new(config));
        logging_information!(SystemEntry::InitializeComplete);
        let http_server = loop {
            let detector = detector.clone();
            let shared_config = shared_config.clone();
            let http_server = HttpServer::new(move || {
                App::new()
                    .app_data(detector.clone())
                    .app_data(shared_config.clone())
                    .service(detect::initialize())
                    .service(config::initialize())
                    .service(log::initialize())
                    .service(message::initialize())
                    .default_service(web::to(default::default_route))
            }).bind(("0.0.0.0", port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!(SystemEntry::BindPortError(port, err));
                    sleep(bind_retry_duration).await;
                },
            }
        };
        logging_information!(SystemEntry::WebReady(port));
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!(SystemEntry::WebPanic(err));
        }
    }

    pub async fn terminate() {
        logging_information!(SystemEntry::Terminating);
        logging_information!(SystemEntry::TerminateComplete);
    }
}
