mod api;
mod config;
mod models;
mod tasks;
mod view;
mod widget;

use api::{check_health, HttpVoteApi, VoteApi, HEALTH_TIMEOUT};
use config::Config;
use log::{error, info, warn};
use std::sync::Arc;
use tasks::refresher::start_refresh;
use tokio::io::{AsyncBufReadExt, BufReader};
use view::{ConsoleView, Page};
use widget::{ElementIds, VotingWidget};

#[tokio::main]
async fn main() {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let api: Arc<dyn VoteApi> = match HttpVoteApi::new(&config.api_url, config.connect_timeout) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };

    // Startup goes on whatever the server says
    let probe = Arc::clone(&api);
    tokio::spawn(async move {
        check_health(&*probe, HEALTH_TIMEOUT).await;
    });

    let ids = ElementIds::new(config.choices.clone());
    let page = Arc::new(Page::with_elements(ids.all()));
    let view = Arc::new(ConsoleView::new(page, ids.clone()));
    let widget = VotingWidget::new(api, view, ids).with_highlight(config.highlight_duration);

    // Lives until stdin closes
    let refresh = start_refresh(widget.clone(), config.refresh_interval);

    info!(
        "Type a choice ({}) and press enter to vote, 'quit' to exit",
        widget.ids().choices().join(", ")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        let choice = line.trim();
        if choice.is_empty() {
            continue;
        }
        if choice == "quit" || choice == "exit" {
            break;
        }
        if !widget.ids().contains(choice) {
            warn!("Unknown choice {:?}", choice);
            continue;
        }

        // Voting doesn't block the prompt
        let widget = widget.clone();
        let choice = choice.to_string();
        tokio::spawn(async move {
            widget.vote(&choice).await;
        });
    }

    refresh.stop();
    info!("Goodbye");
}
