pub const MARKER_EXPANDED: &str = "v";
pub const MARKER_COLLAPSED: &str = ">";
pub const ROW_INDENT: &str = "    ";
pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No items to show.";
