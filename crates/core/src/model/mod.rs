mod form;
mod ids;
mod intent;
mod snapshot;
mod status;
mod tile;

pub use form::{
    ACTIVE_SUBJECT_FIELD, AnswerForm, COURSE_ID_FIELD, CSRF_FIELD, CURRENT_INDEX_FIELD,
    SELECTED_OPTION_FIELD,
};
pub use ids::{CourseId, ParseIdError, QuestionId};
pub use intent::NavigationIntent;
pub use snapshot::{QuestionSnapshot, QuestionStatus, SectionSnapshot, StatusSnapshot};
pub use status::{QuestionStatusMap, StatusDecodeError, StatusFlags};
pub use tile::{Tile, TileBoard, TileSection, TileState, resolve_tile_state};
