pub mod application;
pub mod ats;
pub mod dashboard;
pub mod job;
pub mod profile;
pub mod resume;

pub use application::{Application, ApplicationUpdate, NewApplication, RawApiApplication};
pub use ats::{AtsScoreResult, SkillAnalysis};
pub use dashboard::{ApplicationStats, DashboardSummary};
pub use job::{JobListing, JobSearch};
pub use profile::{Education, Experience, ProfileRecord, ProfileSection, Skill, UserProfile};
pub use resume::{ResumeFile, ResumeUpload};
