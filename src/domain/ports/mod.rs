//! Ports: trait seams between the domain and external collaborators.

pub mod judge;

pub use judge::{Judge, JudgeError, ObfuscationRequest, ScoreVerdict, ScoringRequest};
