//! Job Match - recommendation service for the job board
//!
//! This library ranks open job postings for job seekers and seeker profiles
//! for job postings, using skill overlap and experience level.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchEngine, MatchError, SkillQuery};
pub use crate::models::{JobPosting, JobStatus, MatchResult, ScoringWeights, SeekerProfile};
pub use crate::services::{InMemoryStore, JobStore, PostgresStore, ProfileStore, StoreError};
