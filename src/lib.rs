pub mod cli;
pub mod config;
pub mod contract;
pub mod format;
pub mod github;
pub mod leetcode;
pub mod load_config;
pub mod model;
pub mod organise;
pub mod synchronise;

pub use config::Settings;
pub use model::{Problem, Submission};
pub use organise::{OrganisedFile, Organiser};
pub use synchronise::{synchronise, SyncReport};
