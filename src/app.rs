// src/app.rs

use crate::core::error::{PickError, PreviewError, WorkflowError};
use crate::core::models::{AnalysisResult, PendingFile, Preview, Token, WorkflowState};
use crate::core::page::{Page, Surface};
use crate::core::picker::Picker;
use crate::core::render::render_result;
use crate::core::validator;
use tracing::{debug, error, info, warn};

pub const NO_FILE_MESSAGE: &str = "Please upload an image first";

/// Work the controller asks its host to run. Each command carries the token
/// its completion must echo back.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ReadPreview { token: Token, file: PendingFile },
    Submit { token: Token, file: PendingFile },
}

/// The outcome of a [`Command`], fed back through [`App::apply`].
#[derive(Debug)]
pub enum Completion {
    Preview {
        token: Token,
        outcome: Result<Preview, PreviewError>,
    },
    Analysis {
        token: Token,
        outcome: Result<AnalysisResult, WorkflowError>,
    },
}

/// Workflow state of one widget instance.
#[derive(Debug, Default)]
pub struct Session {
    state: WorkflowState,
    pending: Option<PendingFile>,
    last_token: u64,
    live_preview: Option<Token>,
    live_request: Option<Token>,
}

impl Session {
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn pending(&self) -> Option<&PendingFile> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.live_request.is_some()
    }

    fn issue_token(&mut self) -> Token {
        self.last_token += 1;
        Token(self.last_token)
    }

    fn transition(&mut self, next: WorkflowState) {
        if self.state != next {
            info!(from = %self.state, to = %next, "Workflow transition.");
            self.state = next;
        }
    }
}

/// Session controller: owns the workflow state and the file input, and writes
/// every visible change through its [`Surface`].
pub struct App<S: Surface = Page> {
    pub should_quit: bool,
    pub surface: S,
    pub picker: Picker,
    session: Session,
}

impl<S: Surface> App<S> {
    pub fn new(surface: S) -> Self {
        Self {
            should_quit: false,
            surface,
            picker: Picker::default(),
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> WorkflowState {
        self.session.state
    }

    /// A file was picked. `None` (an input change with no file) does nothing.
    ///
    /// An accepted file becomes the pending file, and the returned commands
    /// start its preview and its upload, preview first.
    pub fn select_file(&mut self, file: Option<PendingFile>) -> Vec<Command> {
        let Some(file) = file else {
            return Vec::new();
        };
        if let Err(e) = validator::validate(&file) {
            warn!(name = %file.name, error = %e, "File rejected.");
            self.surface.notify(e.user_message());
            return Vec::new();
        }

        info!(name = %file.name, media_type = %file.media_type, "File accepted.");
        self.session.pending = Some(file.clone());
        self.session.transition(WorkflowState::Previewing);
        let preview_token = self.session.issue_token();
        self.session.live_preview = Some(preview_token);

        let mut commands = vec![Command::ReadPreview {
            token: preview_token,
            file: file.clone(),
        }];
        commands.push(self.begin_submission(file));
        commands
    }

    pub fn drag_over(&mut self) {
        self.surface.set_drag_over(true);
    }

    pub fn drag_leave(&mut self) {
        self.surface.set_drag_over(false);
    }

    /// A drop ends the drag and is then handled like a pick.
    pub fn drop_file(&mut self, file: Option<PendingFile>) -> Vec<Command> {
        self.surface.set_drag_over(false);
        self.select_file(file)
    }

    /// Uploads the remembered file again. Without one, only notifies.
    pub fn reanalyze(&mut self) -> Vec<Command> {
        match self.session.pending.clone() {
            Some(file) => {
                info!(name = %file.name, "Reanalyzing remembered file.");
                vec![self.begin_submission(file)]
            }
            None => {
                debug!("Reanalyze requested with no remembered file.");
                self.surface.notify(NO_FILE_MESSAGE);
                Vec::new()
            }
        }
    }

    /// Returns the page and the session to their initial state.
    ///
    /// Operations still in flight are not aborted; their tokens are retired
    /// so their completions are ignored when they arrive.
    pub fn clear(&mut self) {
        self.surface.reset_drop_zone();
        self.surface.set_drag_over(false);
        self.picker.clear();
        self.surface.set_loading(false);
        self.surface.set_results_visible(false);
        self.surface.empty_regions();

        self.session.pending = None;
        self.session.live_preview = None;
        self.session.live_request = None;
        self.session.transition(WorkflowState::Idle);
    }

    /// A path from the picker or a drop could not be turned into a file.
    pub fn report_unreadable(&mut self, error: &PickError) {
        warn!(path = %error.path().display(), error = %error, "Could not load selected file.");
        self.surface.notify(&format!("Could not read {}", error.path().display()));
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Preview { token, outcome } => self.finish_preview(token, outcome),
            Completion::Analysis { token, outcome } => self.finish_analysis(token, outcome),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn begin_submission(&mut self, file: PendingFile) -> Command {
        self.surface.set_loading(true);
        self.surface.set_results_visible(false);
        let token = self.session.issue_token();
        self.session.live_request = Some(token);
        self.session.transition(WorkflowState::Submitting);
        Command::Submit { token, file }
    }

    fn finish_preview(&mut self, token: Token, outcome: Result<Preview, PreviewError>) {
        if self.session.live_preview != Some(token) {
            debug!(%token, "Discarding stale preview.");
            return;
        }
        self.session.live_preview = None;
        match outcome {
            Ok(preview) => self.surface.show_preview(&preview.data_uri),
            Err(e) => warn!(%token, error = %e, "Preview could not be produced."),
        }
    }

    fn finish_analysis(&mut self, token: Token, outcome: Result<AnalysisResult, WorkflowError>) {
        if self.session.live_request != Some(token) {
            debug!(%token, "Discarding stale analysis.");
            return;
        }
        self.session.live_request = None;
        match outcome {
            Ok(result) => {
                self.surface.set_loading(false);
                self.surface.set_results_visible(true);
                let rendered = render_result(&result);
                info!(product = %result.product, tier = %rendered.sentiment.tier, "Rendering analysis.");
                self.surface.replace_product(rendered.product);
                self.surface.replace_prices(rendered.prices);
                self.surface.replace_sentiment(rendered.sentiment);
                self.session.transition(WorkflowState::ShowingResult);
            }
            Err(e) => {
                error!(%token, error = %e, "Analysis failed.");
                self.surface.set_loading(false);
                self.surface.notify(e.user_message());
                self.session.transition(WorkflowState::ShowingError);
            }
        }
    }
}
