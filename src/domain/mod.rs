pub mod enums;
pub mod inflight;
pub mod picker;
pub mod session;
pub mod store;
pub mod task;
pub mod views;

pub use enums::{FilterMode, FormField, Theme, UiMode};
pub use inflight::{InFlight, Ticket};
pub use picker::{DeadlinePicker, PickerStep};
pub use session::{EditSession, SessionState, ValidationError};
pub use store::{StoreError, TaskStore};
pub use task::{NewTask, Task, TaskId};
pub use views::{completion_box, filter_counts, filter_tasks, format_deadline, format_local};
