pub mod loaders;
pub mod paper;
pub mod provenance;
pub mod subject;

pub use loaders::{collect_input_files, load_json_record};
pub use paper::{Answer, McqOption, Paper, PaperIssue, PaperMetadata, PaperType, Question};
pub use provenance::{Provenance, Provenanced, ProvenanceReport};
pub use subject::{ExamPattern, Group, GroupName, QuestionType, Subject};
