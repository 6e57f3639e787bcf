#![allow(dead_code)]

pub mod detector;
pub mod summarizer;
pub mod transcripts;
