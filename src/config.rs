/// Externally supplied configuration, immutable per render.
///
/// Builder in the usual consuming style:
///
/// ```
/// use collapsible::CollapsibleConfig;
///
/// let config = CollapsibleConfig::new()
///     .collapsed(true)
///     .negative_margin_while_collapsed("-8px");
/// ```
#[derive(Debug, Clone)]
pub struct CollapsibleConfig {
    /// Forces height to zero when true; natural height when false.
    pub collapsed: bool,
    /// When true, every organic content-size change while expanded is
    /// animated, not just collapse/expand edges.
    pub transition_height_changes: bool,
    /// CSS length applied as a negative bottom margin only while the
    /// container is at zero height. Passed through unvalidated.
    pub negative_margin_while_collapsed: Option<String>,
    /// Gates whether the tab order is touched at all.
    pub remove_from_tab_index_while_collapsed: bool,
}

impl Default for CollapsibleConfig {
    fn default() -> Self {
        Self {
            collapsed: false,
            transition_height_changes: false,
            negative_margin_while_collapsed: None,
            remove_from_tab_index_while_collapsed: true,
        }
    }
}

impl CollapsibleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn transition_height_changes(mut self, transition: bool) -> Self {
        self.transition_height_changes = transition;
        self
    }

    pub fn negative_margin_while_collapsed(mut self, margin: impl Into<String>) -> Self {
        self.negative_margin_while_collapsed = Some(margin.into());
        self
    }

    pub fn remove_from_tab_index_while_collapsed(mut self, remove: bool) -> Self {
        self.remove_from_tab_index_while_collapsed = remove;
        self
    }
}
