//! Document processing: normalization, resume/JD parsing, requirement
//! extraction, synonym expansion, and keyword matching.

pub mod matcher;
pub mod requirements;
pub mod resume;
pub mod synonyms;
pub mod text;

pub use matcher::{KeywordMatch, KeywordMatcher};
pub use requirements::{JdProfile, Priority, RequirementExtractor, RequirementKeyword};
pub use resume::{Education, ResumeProfile, WorkExperience};
pub use synonyms::SynonymExpander;
