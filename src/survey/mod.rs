//! HSE-IT survey domain: models, questionnaire wizard, drafts and table access

pub mod catalog;
pub mod demo;
pub mod draft;
pub mod error;
pub mod model;
pub mod repository;
pub mod wizard;

pub use draft::{DraftList, QuestionDraft};
pub use error::ValidationError;
pub use model::{
    AGE_BANDS, AnswerRow, Area, Demographics, Dimension, LikertLabel, NewArea, NewQuestion, Polarity, Profile, Question,
    SEX_OPTIONS, TENURE_BANDS,
};
pub use wizard::{Advance, BeginOutcome, LoadOutcome, RecordedAnswer, Stage, Wizard};
