pub mod field;
pub mod loaders;
pub mod question;
pub mod view;

pub use field::{BlockKind, Field};
pub use loaders::parse_records;
pub use question::{Answer, AnswerBlock, CardSummary, QuestionId, QuestionRecord};
pub use view::{Theme, ViewState};
