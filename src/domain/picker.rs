use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

/// Where the two-step deadline picker is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerStep {
    #[default]
    Closed,
    AwaitingDate { cursor: NaiveDate },
    AwaitingTime { cursor: NaiveTime },
}

/// Date-then-time deadline picker.
///
/// Confirming a date replaces the date of the staged deadline and keeps its time.
/// Confirming a time replaces hour and minute (seconds drop to zero). Dismissing
/// either step only closes that step; the staged deadline is left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePicker {
    step: PickerStep,
    /// Ask for a time after the date, instead of closing right away
    separate_time_step: bool,
}

impl Default for DeadlinePicker {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DeadlinePicker {
    pub fn new(separate_time_step: bool) -> Self {
        Self {
            step: PickerStep::Closed,
            separate_time_step,
        }
    }

    pub fn step(&self) -> PickerStep {
        self.step
    }

    pub fn is_open(&self) -> bool {
        self.step != PickerStep::Closed
    }

    /// Open the date step, cursor on the staged date (or today)
    pub fn open(&mut self, staged: Option<DateTime<Local>>, now: DateTime<Local>) {
        let cursor = staged.unwrap_or(now).date_naive();
        self.step = PickerStep::AwaitingDate { cursor };
    }

    /// Confirm `date`, merging it into the staged deadline
    pub fn confirm_date(
        &mut self,
        date: NaiveDate,
        staged: &mut Option<DateTime<Local>>,
        now: DateTime<Local>,
    ) {
        if !matches!(self.step, PickerStep::AwaitingDate { .. }) {
            return;
        }

        let time = staged.unwrap_or(now).time();
        if let Some(merged) = resolve_local(date.and_time(time)) {
            *staged = Some(merged);
        }

        self.step = if self.separate_time_step {
            PickerStep::AwaitingTime {
                cursor: staged.unwrap_or(now).time().with_nanosecond(0).unwrap_or(time),
            }
        } else {
            PickerStep::Closed
        };
    }

    /// Confirm `time`, merging hour and minute into the staged date
    pub fn confirm_time(
        &mut self,
        time: NaiveTime,
        staged: &mut Option<DateTime<Local>>,
        now: DateTime<Local>,
    ) {
        if !matches!(self.step, PickerStep::AwaitingTime { .. }) {
            return;
        }

        let date = staged.unwrap_or(now).date_naive();
        let hm = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        if let Some(merged) = resolve_local(date.and_time(hm)) {
            *staged = Some(merged);
        }
        self.step = PickerStep::Closed;
    }

    /// Confirm whatever the cursor of the current step points at
    pub fn confirm_cursor(&mut self, staged: &mut Option<DateTime<Local>>, now: DateTime<Local>) {
        match self.step {
            PickerStep::AwaitingDate { cursor } => self.confirm_date(cursor, staged, now),
            PickerStep::AwaitingTime { cursor } => self.confirm_time(cursor, staged, now),
            PickerStep::Closed => {}
        }
    }

    /// Close the current step without touching the staged deadline
    pub fn dismiss(&mut self) {
        self.step = PickerStep::Closed;
    }

    /// Move the date cursor by whole days
    pub fn shift_days(&mut self, days: i64) {
        if let PickerStep::AwaitingDate { cursor } = &mut self.step {
            if let Some(moved) = cursor.checked_add_signed(Duration::days(days)) {
                *cursor = moved;
            }
        }
    }

    /// Move the time cursor by minutes, wrapping around midnight
    pub fn shift_minutes(&mut self, minutes: i64) {
        if let PickerStep::AwaitingTime { cursor } = &mut self.step {
            let (moved, _) = cursor.overflowing_add_signed(Duration::minutes(minutes));
            *cursor = moved;
        }
    }
}

/// Interpret a wall-clock time in the local zone.
/// Ambiguous times take the earlier instant; times inside a DST gap move one hour forward.
fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}
