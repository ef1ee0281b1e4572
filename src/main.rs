use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use chat_widget::backend::http::HttpBackend;
use chat_widget::config::Config;
use chat_widget::terminal::{self, Command, TerminalLog, TerminalView, HELP};
use chat_widget::ChatController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with the transcript
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_widget=info".into()),
        )
        .init();

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let config = Config::from_env()?;
    let backend = HttpBackend::new(&config.backend_url)?;
    let controller = ChatController::new(backend, TerminalLog::new(), TerminalView);

    info!("Talking to {}", controller.backend().base_url());
    println!("{HELP}");

    // ── Input loop ────────────────────────────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match terminal::parse_command(&line) {
            Command::Text(text) => {
                controller.submit_text(&text).await;
            }
            Command::SelectImage(path) => match terminal::load_image(&path).await {
                Ok(image) => controller.select_image(Some(image)),
                Err(e) => {
                    error!("Image selection failed: {e}");
                    eprintln!("{e}");
                }
            },
            Command::ClearImage => controller.select_image(None),
            Command::AskImage(question) => {
                controller.submit_image_question(&question).await;
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(input) => eprintln!("Unknown command: {input} (try /help)"),
        }
    }

    info!(
        "Session ended with {} log entries",
        controller.log().inner().len()
    );
    Ok(())
}
