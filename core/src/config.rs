use serde::Deserialize;
use serde::Serialize;

/// Geometry of the row window and the paging it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Rows shown at once.
    #[serde(default = "default_display_count")]
    pub display_count: usize,

    /// Rows the window moves per scroll step.
    #[serde(default = "default_step_size")]
    pub step_size: usize,

    /// Page size assumed until the first page of a query has arrived.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_display_count() -> usize {
    35
}

fn default_step_size() -> usize {
    3
}

fn default_page_size() -> usize {
    100
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            display_count: default_display_count(),
            step_size: default_step_size(),
            default_page_size: default_page_size(),
        }
    }
}

impl PagerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.display_count == 0 {
            return Err("display_count must be > 0".to_string());
        }
        if self.step_size == 0 {
            return Err("step_size must be > 0".to_string());
        }
        if self.default_page_size == 0 {
            return Err("default_page_size must be > 0".to_string());
        }
        Ok(())
    }
}
