mod draft;
mod ids;
mod path;
mod plan;
mod profile;
mod session;
mod unit;

pub use ids::{DraftId, ParseIdError, PlanId};

pub use draft::{Draft, DraftError, DraftList, DraftStatus};
pub use path::AppPath;
pub use plan::{LessonPlan, NewLessonPlan};
pub use profile::{Carrera, Materia, ProfileError, SubjectDraft, TeacherProfile};
pub use session::{Role, RoleParseError, Session, SessionError, UserRecord};
pub use unit::{SubjectField, UnitField, UnitFields, ValidationError};
