pub mod compare;
pub mod design;
pub mod source;
pub mod types;

pub use compare::{NUMERIC_TOLERANCE, compare_screen_spec, nearly_equal};
pub use design::{DesignNode, FALLBACK_SCREEN_NAME, TypeStyle, extract_from_document};
pub use source::{FONT_SIZE_WINDOW, extract_from_source, load_source_spec, number_from};
pub use types::{ComparisonResult, DiffFinding, GapSpec, PaddingSpec, ScreenSpec, TextSpec};
