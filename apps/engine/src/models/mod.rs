pub mod posting;
pub mod profile;
pub mod tailored;

pub use posting::{Posting, PostingStatus, ScoreBreakdown};
pub use profile::{
    Bullet, EducationModule, ExperienceModule, FocusArea, FocusVariants, Language, Locale,
    OtherModule, PersonalInfo, Profile, Skill, SkillSet, Summary,
};
pub use tailored::{ModuleKind, TailoredBullet, TailoredEntry, TailoredSelection};
