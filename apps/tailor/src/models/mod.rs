pub mod resume;

pub use resume::{
    EducationEntry, ExperienceEntry, ResumeRecords, SectionKind, SkillCategories,
};
