use std::{collections::HashMap, sync::Arc, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand};
use interaction_core::{
    cookies::{CookieTokens, StaticCookies},
    dom::{ClickTarget, ElementDesc, FOLLOW_BTN_CLASS, LIKE_BTN_CLASS, SAVE_BTN_CLASS},
    InteractionController, StaticPage, UiEvent, SAVED_FLASH_REVERT_DELAY,
};
use shared::domain::PostId;
use tracing::info;

mod config;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    /// Cookie header carrying the anti-forgery token, e.g. "csrftoken=...".
    #[arg(long)]
    cookies: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Toggle the like state of a post.
    Like { post_id: i64 },
    /// Toggle following a user.
    Follow { username: String },
    /// Replace a post's content.
    Edit { post_id: i64, content: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    if let Some(cookies) = args.cookies {
        settings.cookies = Some(cookies);
    }
    let server_url = config::normalize_server_url(&settings.server_url);

    let tokens = Arc::new(CookieTokens::new(Arc::new(StaticCookies(
        settings.cookies.unwrap_or_default(),
    ))));

    let mut page = StaticPage {
        drafts: HashMap::new(),
        follow_label_present: true,
        follower_counter_present: true,
    };
    let (click, awaits_flash) = match &args.command {
        Command::Like { post_id } => (
            ClickTarget::on(
                ElementDesc::with_class(LIKE_BTN_CLASS).data("post-id", post_id.to_string()),
            ),
            false,
        ),
        Command::Follow { username } => (
            ClickTarget::on(
                ElementDesc::with_class(FOLLOW_BTN_CLASS).data("username", username.clone()),
            ),
            false,
        ),
        Command::Edit { post_id, content } => {
            page.drafts.insert(PostId(*post_id), content.clone());
            (
                ClickTarget::on(
                    ElementDesc::with_class(SAVE_BTN_CLASS).data("post-id", post_id.to_string()),
                ),
                true,
            )
        }
    };

    info!(server_url = %server_url, "dispatching {:?}", args.command);
    let controller = InteractionController::new(server_url, tokens, Arc::new(page));
    let mut events = controller.subscribe_events();
    controller.handle_click(&click).await;

    while let Ok(event) = events.try_recv() {
        print_event(&event);
    }

    if awaits_flash {
        let grace = SAVED_FLASH_REVERT_DELAY + Duration::from_millis(250);
        if let Ok(Ok(event)) = tokio::time::timeout(grace, events.recv()).await {
            print_event(&event);
        }
    }

    Ok(())
}

fn print_event(event: &UiEvent) {
    match event {
        UiEvent::Patches(patches) => {
            for patch in patches {
                println!("{patch}");
            }
        }
        UiEvent::Alert(message) => println!("alert: {message}"),
    }
}
