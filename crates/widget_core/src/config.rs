use serde::Deserialize;

use crate::state::ViewMode;

/// Display policy knobs. Product configuration, not data-model limits: the
/// index keeps full buckets regardless of what a grid cell shows.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Upper bound on order snippets rendered inside one grid cell; `None`
    /// shows every entry.
    pub max_snippets_per_cell: Option<usize>,
    pub default_mode: ViewMode,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            max_snippets_per_cell: Some(3),
            default_mode: ViewMode::Grid,
        }
    }
}
