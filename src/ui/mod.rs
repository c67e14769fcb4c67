pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{info, success, warn};
pub use table::{diagnostics_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
