pub mod daily;
pub mod decorate;
pub mod normalize;
pub mod table;
pub mod view;
pub mod weekly;

pub use daily::build_daily_schedule;
pub use decorate::{decorate, status_badge, RowDecoration};
pub use normalize::{normalize_record, normalize_records, realign};
pub use table::{Granularity, Marker, ScheduleRow, ScheduleTable, TimeColumn};
pub use view::{list_view, owner_names, TaskFilter, ViewRow};
pub use weekly::build_weekly_schedule;
