use std::{collections::HashMap, sync::Arc, time::Duration};

use reqwest::Client;
use shared::{
    domain::{PostId, Username, ViewPhase},
    protocol::{EditPostBody, EditPostResponse, FollowState, LikeState},
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

pub mod classify;
pub mod cookies;
pub mod dom;
pub mod reducer;

use classify::{classify, Action};
use dom::{ClickTarget, DomPatch};
use reducer::SaveApplied;

pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const CSRF_COOKIE: &str = "csrftoken";
pub const SAVED_FLASH_REVERT_DELAY: Duration = Duration::from_millis(2000);

const GENERIC_REJECTION_NOTICE: &str = "Error updating post";
const SAVE_FAILURE_NOTICE: &str = "An error occurred while saving.";
const EMPTY_CONTENT_NOTICE: &str = "Content cannot be empty";

/// Anti-forgery token capability. Consulted fresh on every click; a `None`
/// aborts the whole click without a user-facing notice.
pub trait TokenProvider: Send + Sync {
    fn csrf_token(&self) -> Option<String>;
}

pub struct MissingTokenProvider;

impl TokenProvider for MissingTokenProvider {
    fn csrf_token(&self) -> Option<String> {
        None
    }
}

/// Read access to the live page for the inputs patches cannot carry: the
/// edit drafts and the presence of optional follow elements.
pub trait PageInputs: Send + Sync {
    fn edit_draft(&self, post: PostId) -> Option<String>;
    fn has_follow_label(&self, user: &Username) -> bool;
    fn has_follower_counter(&self) -> bool;
}

/// Fixed page description, enough for driving the controller without a
/// browser attached.
#[derive(Default)]
pub struct StaticPage {
    pub drafts: HashMap<PostId, String>,
    pub follow_label_present: bool,
    pub follower_counter_present: bool,
}

impl PageInputs for StaticPage {
    fn edit_draft(&self, post: PostId) -> Option<String> {
        self.drafts.get(&post).cloned()
    }

    fn has_follow_label(&self, _user: &Username) -> bool {
        self.follow_label_present
    }

    fn has_follower_counter(&self) -> bool {
        self.follower_counter_present
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Apply these mutations to the page, in order.
    Patches(Vec<DomPatch>),
    /// Surface a blocking notice to the user.
    Alert(String),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("edit rejected: {0}")]
    Rejected(String),
    #[error("edit response carried no content")]
    MalformedPayload,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Translates classified clicks into at most one request per action and
/// reconciles the page through an event stream of patch batches.
pub struct InteractionController {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    page: Arc<dyn PageInputs>,
    phases: Mutex<HashMap<PostId, ViewPhase>>,
    flash_revert_delay: Duration,
    events: broadcast::Sender<UiEvent>,
}

impl InteractionController {
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
        page: Arc<dyn PageInputs>,
    ) -> Arc<Self> {
        Self::new_with_flash_revert_delay(base_url, tokens, page, SAVED_FLASH_REVERT_DELAY)
    }

    pub fn new_with_flash_revert_delay(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
        page: Arc<dyn PageInputs>,
        flash_revert_delay: Duration,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(1024);
        Arc::new(Self {
            http: Client::new(),
            base_url: base_url.into(),
            tokens,
            page,
            phases: Mutex::new(HashMap::new()),
            flash_revert_delay,
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    pub async fn view_phase(&self, post: PostId) -> ViewPhase {
        self.phases
            .lock()
            .await
            .get(&post)
            .copied()
            .unwrap_or(ViewPhase::Viewing)
    }

    /// Entry point for one delegated click. The token is read before any
    /// classification; without it nothing runs, including the offline
    /// edit/cancel transitions.
    pub async fn handle_click(self: &Arc<Self>, click: &ClickTarget) {
        let Some(token) = self.tokens.csrf_token() else {
            error!("anti-forgery token not found in cookie store");
            return;
        };

        for action in classify(click) {
            debug!(?action, "dispatching click action");
            match action {
                Action::BeginEdit(post) => self.begin_edit(post).await,
                Action::CancelEdit(post) => self.cancel_edit(post).await,
                Action::SubmitEdit(post) => self.submit_edit(&token, post).await,
                Action::ToggleLike(post) => self.toggle_like(&token, post).await,
                Action::ToggleFollow(user) => self.toggle_follow(&token, &user).await,
            }
        }
    }

    async fn begin_edit(&self, post: PostId) {
        self.phases.lock().await.insert(post, ViewPhase::Editing);
        self.emit_patches(reducer::begin_edit(post));
    }

    async fn cancel_edit(&self, post: PostId) {
        self.phases.lock().await.insert(post, ViewPhase::Viewing);
        self.emit_patches(reducer::cancel_edit(post));
    }

    async fn submit_edit(self: &Arc<Self>, token: &str, post: PostId) {
        let Some(draft) = self.page.edit_draft(post) else {
            error!(post_id = post.0, "edit draft element not found on page");
            return;
        };
        let content = draft.trim().to_string();
        if content.is_empty() {
            self.emit_alert(EMPTY_CONTENT_NOTICE);
            return;
        }

        // Disable-before-await: the patch reaches the page before the
        // request future is first polled.
        self.emit_patches(reducer::save_in_flight(post));

        match self.post_edit(token, post, &content).await {
            Ok(saved_content) => {
                self.phases.lock().await.insert(post, ViewPhase::Viewing);
                let SaveApplied {
                    patches,
                    flash_revert,
                } = reducer::save_applied(post, &saved_content);
                self.emit_patches(patches);
                self.schedule_flash_revert(flash_revert);
                info!(post_id = post.0, "post content saved");
            }
            Err(SaveError::Rejected(message)) => self.emit_alert(&message),
            Err(err) => {
                error!(post_id = post.0, "edit request failed: {err}");
                self.emit_alert(SAVE_FAILURE_NOTICE);
            }
        }

        // Runs whatever the outcome was, transport failures included.
        self.emit_patches(reducer::save_settled(post));
    }

    async fn toggle_like(&self, token: &str, post: PostId) {
        match self.post_toggle_like(token, post).await {
            Ok(state) => self.emit_patches(reducer::like_updated(post, &state)),
            Err(err) => error!(post_id = post.0, "like toggle failed: {err}"),
        }
    }

    async fn toggle_follow(&self, token: &str, user: &Username) {
        match self.post_toggle_follow(token, user).await {
            Ok(state) => {
                let patches = reducer::follow_updated(
                    user,
                    &state,
                    self.page.has_follow_label(user),
                    self.page.has_follower_counter(),
                );
                self.emit_patches(patches);
            }
            Err(err) => error!(username = user.as_str(), "follow toggle failed: {err}"),
        }
    }

    // The backend ships application errors as 4xx JSON bodies, so the body
    // is decoded regardless of status.
    async fn post_edit(
        &self,
        token: &str,
        post: PostId,
        content: &str,
    ) -> Result<String, SaveError> {
        let response: EditPostResponse = self
            .http
            .post(format!("{}/edit_post/{}", self.base_url, post))
            .header(CSRF_HEADER, token)
            .json(&EditPostBody {
                content: content.to_string(),
            })
            .send()
            .await?
            .json()
            .await?;

        if !response.success {
            return Err(SaveError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| GENERIC_REJECTION_NOTICE.to_string()),
            ));
        }
        response.content.ok_or(SaveError::MalformedPayload)
    }

    async fn post_toggle_like(
        &self,
        token: &str,
        post: PostId,
    ) -> Result<LikeState, reqwest::Error> {
        self.http
            .post(format!("{}/toggle_like/{}", self.base_url, post))
            .header(CSRF_HEADER, token)
            .send()
            .await?
            .json()
            .await
    }

    async fn post_toggle_follow(
        &self,
        token: &str,
        user: &Username,
    ) -> Result<FollowState, reqwest::Error> {
        self.http
            .post(format!("{}/toggle_follow/{}", self.base_url, user))
            .header(CSRF_HEADER, token)
            .send()
            .await?
            .json()
            .await
    }

    fn schedule_flash_revert(self: &Arc<Self>, patches: Vec<DomPatch>) {
        let controller = Arc::clone(self);
        let delay = self.flash_revert_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.emit_patches(patches);
        });
    }

    fn emit_patches(&self, patches: Vec<DomPatch>) {
        let _ = self.events.send(UiEvent::Patches(patches));
    }

    fn emit_alert(&self, message: &str) {
        let _ = self.events.send(UiEvent::Alert(message.to_string()));
    }
}

#[cfg(test)]
mod tests;
