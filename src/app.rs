use crate::api::{ApiError, Completion, Request, UpdateOrigin};
use crate::domain::{
    filter_tasks, DeadlinePicker, EditSession, FilterMode, FormField, InFlight, SessionState, StoreError,
    Task, TaskId, TaskStore, Theme, Ticket, UiMode, ValidationError,
};
use chrono::{DateTime, Local};

/// What kind of overlay message is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Blocking: the action wasn't attempted
    Validation,
    /// A remote call failed; local state is unchanged
    Error,
}

/// Message overlay that must be dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub filter: FilterMode,
    pub theme: Theme,
    pub show_help: bool,
    pub session: EditSession,
    pub form_field: FormField,
    pub picker: DeadlinePicker,
    pub notice: Option<Notice>,
    /// Index into the filtered view, not the store
    pub selected_index: usize,
    pub inflight: InFlight,
    /// Ticket of the form submission in flight, if any
    pub submitting: Option<Ticket>,
}

impl AppState {
    pub fn new(theme: Theme, separate_time_step: bool) -> Self {
        Self {
            store: TaskStore::new(),
            filter: FilterMode::All,
            theme,
            show_help: false,
            session: EditSession::Idle,
            form_field: FormField::Title,
            picker: DeadlinePicker::new(separate_time_step),
            notice: None,
            selected_index: 0,
            inflight: InFlight::new(),
            submitting: None,
        }
    }

    /// Which overlay gets the keyboard
    pub fn ui_mode(&self) -> UiMode {
        if self.notice.is_some() {
            UiMode::Notice
        } else if self.picker.is_open() {
            UiMode::Picker
        } else if self.show_help {
            UiMode::Help
        } else if self.session.is_active() {
            UiMode::Form
        } else {
            UiMode::Normal
        }
    }

    /// Tasks shown under the current filter
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(self.store.tasks(), self.filter)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_index).copied()
    }

    pub fn is_busy(&self) -> bool {
        self.inflight.is_loading() || self.inflight.pending_count() > 0 || self.submitting.is_some()
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside the visible list
    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        if self.filter != filter {
            self.filter = filter;
            self.selected_index = 0;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn show_validation(&mut self, err: ValidationError) {
        self.notice = Some(Notice {
            kind: NoticeKind::Validation,
            title: "Missing information".to_string(),
            message: err.to_string(),
        });
    }

    fn report_error(&mut self, action: &str, message: String) {
        tracing::error!("{}: {}", action, message);
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            title: action.to_string(),
            message,
        });
    }

    fn report_api_error(&mut self, action: &str, err: &ApiError) {
        self.report_error(action, err.to_string());
    }

    // Remote operations. Each returns the request to dispatch; the store only
    // changes once the matching completion is applied.

    pub fn request_load(&mut self) -> Request {
        Request::Load {
            ticket: self.inflight.begin_load(),
        }
    }

    /// Toggle completion of a task. Ids not in the store are ignored.
    pub fn toggle_task(&mut self, id: &TaskId) -> Option<Request> {
        let Some(task) = self.store.prepare_toggle(id) else {
            tracing::debug!("toggle ignored, task {} not cached", id);
            return None;
        };
        let ticket = self.inflight.begin_task(id);
        Some(Request::Update {
            ticket,
            task,
            origin: UpdateOrigin::Toggle,
        })
    }

    pub fn toggle_selected(&mut self) -> Option<Request> {
        let id = self.selected_task()?.id.clone();
        self.toggle_task(&id)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> Request {
        Request::Delete {
            ticket: self.inflight.begin_task(id),
            id: id.clone(),
        }
    }

    pub fn delete_selected(&mut self) -> Option<Request> {
        let id = self.selected_task()?.id.clone();
        Some(self.delete_task(&id))
    }

    // Edit session

    /// Open the form for a new task
    pub fn start_create(&mut self, now: DateTime<Local>) {
        if self.session.begin_create(now) {
            self.form_field = FormField::Title;
            self.picker.dismiss();
        }
    }

    /// Open the form on the selected task
    pub fn start_edit_selected(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        if self.session.begin_edit(&task) {
            self.form_field = FormField::Title;
            self.picker.dismiss();
        }
    }

    /// Close the form. A save already sent keeps going.
    pub fn cancel_form(&mut self) {
        self.session.close();
        self.picker.dismiss();
        self.form_field = FormField::Title;
        self.submitting = None;
    }

    pub fn form_next_field(&mut self) {
        self.form_field = self.form_field.next(self.session.is_editing());
    }

    pub fn form_add_char(&mut self, c: char) {
        if self.form_field != FormField::Title {
            return;
        }
        if let Some(draft) = self.session.draft_mut() {
            draft.title.push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if self.form_field != FormField::Title {
            return;
        }
        if let Some(draft) = self.session.draft_mut() {
            draft.title.pop();
        }
    }

    /// Clear the staged deadline
    pub fn form_clear_deadline(&mut self) {
        if self.form_field != FormField::Deadline {
            return;
        }
        if let Some(draft) = self.session.draft_mut() {
            draft.deadline = None;
        }
    }

    pub fn form_toggle_completed(&mut self) {
        if self.form_field != FormField::Completed || !self.session.is_editing() {
            return;
        }
        if let Some(draft) = self.session.draft_mut() {
            draft.completed = !draft.completed;
        }
    }

    /// Validate the drafts and build the create or update request.
    /// Validation failures raise a blocking notice and send nothing.
    pub fn submit_form(&mut self) -> Option<Request> {
        if self.submitting.is_some() {
            return None;
        }

        let prepared: Result<Request, StoreError> = match &self.session {
            EditSession::Idle => return None,
            EditSession::Creating(draft) => TaskStore::prepare_create(&draft.title, draft.deadline)
                .map(|task| Request::Create {
                    ticket: self.inflight.begin_create(),
                    task,
                })
                .map_err(StoreError::from),
            EditSession::Editing { target, draft } => {
                self.store.prepare_edit(target, draft).map(|task| Request::Update {
                    ticket: self.inflight.begin_task(&task.id),
                    task,
                    origin: UpdateOrigin::Edit,
                })
            }
        };

        match prepared {
            Ok(request) => {
                self.submitting = match &request {
                    Request::Create { ticket, .. } | Request::Update { ticket, .. } => Some(ticket.clone()),
                    _ => None,
                };
                Some(request)
            }
            Err(StoreError::Validation(err)) => {
                self.show_validation(err);
                None
            }
            Err(err) => {
                self.report_error("Couldn't save task", err.to_string());
                None
            }
        }
    }

    // Deadline picker

    pub fn open_picker(&mut self, now: DateTime<Local>) {
        if let Some(draft) = self.session.draft() {
            self.picker.open(draft.deadline, now);
        }
    }

    pub fn picker_confirm(&mut self, now: DateTime<Local>) {
        if let Some(draft) = self.session.draft_mut() {
            self.picker.confirm_cursor(&mut draft.deadline, now);
        }
    }

    pub fn picker_dismiss(&mut self) {
        self.picker.dismiss();
    }

    // Completions

    /// Patch local state with a finished request
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Loaded { ticket, result } => {
                if !self.inflight.settle(&ticket) {
                    tracing::debug!("dropping stale load {:?}", ticket);
                    return;
                }
                match result {
                    Ok(tasks) => {
                        tracing::info!("loaded {} tasks", tasks.len());
                        self.store.replace_all(tasks);
                        self.clamp_selection();
                    }
                    Err(err) => self.report_api_error("Couldn't load tasks", &err),
                }
            }
            Completion::Created { ticket, result } => {
                self.inflight.settle(&ticket);
                let ours = self.submitting.as_ref() == Some(&ticket);
                if ours {
                    self.submitting = None;
                }
                match result {
                    Ok(task) => {
                        tracing::info!("created task {}", task.id);
                        self.store.append(task);
                        if ours && self.session.state() == SessionState::Creating {
                            self.cancel_form();
                        }
                    }
                    Err(err) => self.report_api_error("Couldn't add task", &err),
                }
            }
            Completion::Updated {
                ticket,
                origin,
                result,
            } => {
                let latest = self.inflight.settle(&ticket);
                let ours = self.submitting.as_ref() == Some(&ticket);
                if ours {
                    self.submitting = None;
                }
                match result {
                    Ok(task) => {
                        let edited_id = task.id.clone();
                        if latest {
                            tracing::info!("task {} saved", task.id);
                            self.store.replace(task);
                            self.clamp_selection();
                        } else {
                            tracing::debug!("dropping stale update {:?}", ticket);
                        }
                        if origin == UpdateOrigin::Edit
                            && ours
                            && self.session.target() == Some(&edited_id)
                        {
                            self.cancel_form();
                        }
                    }
                    Err(err) => {
                        let action = match origin {
                            UpdateOrigin::Toggle => "Couldn't update task",
                            UpdateOrigin::Edit => "Couldn't save changes",
                        };
                        if latest || ours {
                            self.report_api_error(action, &err);
                        } else {
                            tracing::debug!("dropping stale update error {:?}: {}", ticket, err);
                        }
                    }
                }
            }
            Completion::Deleted { ticket, id, result } => {
                let latest = self.inflight.settle(&ticket);
                match result {
                    // Gone on the server, so anything still in flight for it is moot
                    Ok(()) => {
                        tracing::info!("deleted task {}", id);
                        self.inflight.forget(&id);
                        self.store.remove_by_id(&id);
                        self.clamp_selection();
                    }
                    Err(err) if latest => self.report_api_error("Couldn't delete task", &err),
                    Err(err) => tracing::debug!("dropping stale delete error {:?}: {}", ticket, err),
                }
            }
        }
    }
}
