//! Huntflow API module
//!
//! Thin async client over the handful of endpoints the importer needs,
//! behind the `RecruitingApi` trait so the import loop can run against
//! any implementation.

pub mod client;
pub mod error;
pub mod models;

pub use client::{HuntflowClient, RecruitingApi};
pub use error::ApiError;
pub use models::{
    CandidatePayload, CandidateRecord, ExternalData, ExternalEntry, FileRef, LinkPayload, Opening,
    ResumeUpload, Stage,
};
