//! Questionnaire wizard state machine
//!
//! `Demographic → Questions → Review`, linear. The wizard itself performs no
//! I/O: it tells the caller when questions must be fetched and hands out the
//! answer row to persist. The caller reports a successful insert back through
//! [`Wizard::commit_answer`]; a failed insert simply never commits, which
//! leaves the index and the selection untouched.
//!
//! Rows written during `Questions` are never deleted. Going back pops only the
//! in-memory entry, and redoing the survey starts over without cleanup.

use super::error::ValidationError;
use super::model::{AnswerRow, Demographics, LikertLabel, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Demographic,
    Questions,
    Review,
}

/// An answer already persisted during this run
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAnswer {
    pub question_id: String,
    pub question_text: String,
    pub label: LikertLabel,
}

impl RecordedAnswer {
    pub fn value(&self) -> i32 {
        self.label.value()
    }
}

/// What the caller must do after leaving the demographic stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// First entry: fetch the question list
    FetchQuestions,
    /// Questions are already loaded
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    /// Nothing registered; the caller leaves the wizard
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next question
    Next,
    /// The last question was answered
    Review,
    /// The row does not belong to the current question
    Stale,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    stage: Stage,
    demographics: Demographics,
    questions: Option<Vec<Question>>,
    index: usize,
    selection: Option<LikertLabel>,
    answers: Vec<RecordedAnswer>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            stage: Stage::Demographic,
            demographics: Demographics::default(),
            questions: None,
            index: 0,
            selection: None,
            answers: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    /// Demographic fields are editable only before the questions start
    pub fn demographics_mut(&mut self) -> Option<&mut Demographics> {
        (self.stage == Stage::Demographic).then_some(&mut self.demographics)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selection(&self) -> Option<LikertLabel> {
        self.selection
    }

    pub fn answers(&self) -> &[RecordedAnswer] {
        &self.answers
    }

    pub fn questions_loaded(&self) -> bool {
        self.questions.is_some()
    }

    pub fn question_count(&self) -> usize {
        self.questions.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.stage {
            Stage::Questions => self.questions.as_ref()?.get(self.index),
            _ => None,
        }
    }

    /// Leave the demographic stage once every field is filled in
    pub fn begin_questions(&mut self) -> Result<BeginOutcome, ValidationError> {
        if self.stage != Stage::Demographic {
            return Ok(BeginOutcome::Ready);
        }
        if !self.demographics.is_complete() {
            return Err(ValidationError::IncompleteDemographics);
        }

        self.stage = Stage::Questions;
        self.index = 0;
        self.selection = None;

        if self.questions.is_some() {
            Ok(BeginOutcome::Ready)
        } else {
            Ok(BeginOutcome::FetchQuestions)
        }
    }

    /// Install the fetched, already ordered question list
    pub fn load_questions(&mut self, questions: Vec<Question>) -> LoadOutcome {
        let outcome = if questions.is_empty() {
            LoadOutcome::Empty
        } else {
            LoadOutcome::Ready
        };
        self.questions = Some(questions);
        self.index = 0;
        outcome
    }

    pub fn select(&mut self, label: LikertLabel) {
        if self.stage == Stage::Questions {
            self.selection = Some(label);
        }
    }

    /// Row to persist for the current question and selection
    pub fn pending_answer(&self, participant_id: &str) -> Result<AnswerRow, ValidationError> {
        let question = self
            .current_question()
            .ok_or(ValidationError::NoActiveQuestion)?;
        let label = self.selection.ok_or(ValidationError::NoAnswerSelected)?;

        Ok(AnswerRow {
            id_participante: participant_id.to_string(),
            id_questao: question.id.clone(),
            resposta_texto: label.label().to_string(),
            valor: label.value(),
            sentido: question.sentido,
            dimensao: question.dimensao,
            sexo: self.demographics.sexo.clone(),
            faixa_etaria: self.demographics.faixa_etaria.clone(),
            setor: self.demographics.setor.clone(),
            tempo_empresa: self.demographics.tempo_empresa.clone(),
        })
    }

    /// Record a persisted row and move forward
    pub fn commit_answer(&mut self, row: &AnswerRow) -> Advance {
        let Some(question) = self.current_question() else {
            return Advance::Stale;
        };
        if question.id != row.id_questao {
            return Advance::Stale;
        }
        let Some(label) = LikertLabel::from_label(&row.resposta_texto) else {
            return Advance::Stale;
        };

        let recorded = RecordedAnswer {
            question_id: question.id.clone(),
            question_text: question.pergunta.clone(),
            label,
        };
        self.answers.push(recorded);
        self.selection = None;

        if self.index + 1 < self.question_count() {
            self.index += 1;
            Advance::Next
        } else {
            self.stage = Stage::Review;
            Advance::Review
        }
    }

    /// Step back one question, restoring its answer as the selection
    pub fn back(&mut self) -> bool {
        if self.stage != Stage::Questions || self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.selection = self.answers.pop().map(|answer| answer.label);
        true
    }

    /// Start the questions over from the first one
    pub fn redo(&mut self) -> bool {
        if self.stage != Stage::Review {
            return false;
        }
        self.stage = Stage::Questions;
        self.index = 0;
        self.selection = None;
        self.answers.clear();
        true
    }

    /// Whether confirmation is available (it writes nothing)
    pub fn can_confirm(&self) -> bool {
        self.stage == Stage::Review
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::model::{Dimension, Polarity};

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            pergunta: format!("Pergunta {}", id),
            sentido: Polarity::Positivo,
            dimensao: Dimension::Control,
            organizacao: None,
            cadastrado_por_nome: None,
            created_at: None,
        }
    }

    fn filled() -> Wizard {
        let mut wizard = Wizard::new();
        let demographics = wizard.demographics_mut().unwrap();
        demographics.sexo = "Feminino".into();
        demographics.faixa_etaria = "30-40".into();
        demographics.setor = "RH".into();
        demographics.tempo_empresa = "1-3 anos".into();
        wizard
    }

    fn answer(wizard: &mut Wizard, label: LikertLabel) -> Advance {
        wizard.select(label);
        let row = wizard.pending_answer("p-1").unwrap();
        wizard.commit_answer(&row)
    }

    #[test]
    fn test_incomplete_demographics_stay() {
        let mut wizard = Wizard::new();
        wizard.demographics_mut().unwrap().sexo = "Outro".into();
        assert_eq!(wizard.begin_questions(), Err(ValidationError::IncompleteDemographics));
        assert_eq!(wizard.stage(), Stage::Demographic);
    }

    #[test]
    fn test_first_entry_requests_fetch_once() {
        let mut wizard = filled();
        assert_eq!(wizard.begin_questions(), Ok(BeginOutcome::FetchQuestions));
        assert_eq!(wizard.stage(), Stage::Questions);
        assert!(wizard.demographics_mut().is_none());

        assert_eq!(wizard.load_questions(vec![question("a")]), LoadOutcome::Ready);
        assert_eq!(wizard.current_question().map(|q| q.id.as_str()), Some("a"));
    }

    #[test]
    fn test_empty_question_list() {
        let mut wizard = filled();
        wizard.begin_questions().unwrap();
        assert_eq!(wizard.load_questions(vec![]), LoadOutcome::Empty);
        assert!(wizard.current_question().is_none());
        assert_eq!(wizard.pending_answer("p"), Err(ValidationError::NoActiveQuestion));
    }

    #[test]
    fn test_advance_requires_selection() {
        let mut wizard = filled();
        wizard.begin_questions().unwrap();
        wizard.load_questions(vec![question("a"), question("b")]);
        assert_eq!(wizard.pending_answer("p"), Err(ValidationError::NoAnswerSelected));
        assert_eq!(wizard.index(), 0);
    }

    #[test]
    fn test_pending_answer_copies_question_and_demographics() {
        let mut wizard = filled();
        wizard.begin_questions().unwrap();
        wizard.load_questions(vec![question("a")]);
        wizard.select(LikertLabel::Frequentemente);

        let row = wizard.pending_answer("p-9").unwrap();
        assert_eq!(row.id_participante, "p-9");
        assert_eq!(row.id_questao, "a");
        assert_eq!(row.resposta_texto, "Frequentemente");
        assert_eq!(row.valor, 4);
        assert_eq!(row.dimensao, Dimension::Control);
        assert_eq!(row.setor, "RH");
        // nothing moves until the insert is committed
        assert_eq!(wizard.index(), 0);
        assert_eq!(wizard.selection(), Some(LikertLabel::Frequentemente));
    }

    #[test]
    fn test_review_reached_exactly_once() {
        let mut wizard = filled();
        wizard.begin_questions().unwrap();
        wizard.load_questions(vec![question("a"), question("b")]);

        assert_eq!(answer(&mut wizard, LikertLabel::Nunca), Advance::Next);
        wizard.select(LikertLabel::Sempre);
        let last = wizard.pending_answer("p-1").unwrap();
        assert_eq!(wizard.commit_answer(&last), Advance::Review);
        assert_eq!(wizard.stage(), Stage::Review);

        // a duplicate completion for the same row is ignored
        assert_eq!(wizard.commit_answer(&last), Advance::Stale);
        assert_eq!(wizard.answers().len(), 2);
        assert!(wizard.can_confirm());
    }

    #[test]
    fn test_back_restores_previous_label() {
        let mut wizard = filled();
        wizard.begin_questions().unwrap();
        wizard.load_questions(vec![question("a"), question("b"), question("c")]);
        answer(&mut wizard, LikertLabel::Raramente);
        answer(&mut wizard, LikertLabel::AsVezes);
        assert_eq!(wizard.index(), 2);

        assert!(wizard.back());
        assert_eq!(wizard.index(), 1);
        assert_eq!(wizard.selection(), Some(LikertLabel::AsVezes));
        assert_eq!(wizard.answers().len(), 1);

        assert!(wizard.back());
        assert_eq!(wizard.index(), 0);
        assert_eq!(wizard.selection(), Some(LikertLabel::Raramente));
        assert!(!wizard.back());
    }

    #[test]
    fn test_redo_keeps_loaded_questions() {
        let mut wizard = filled();
        wizard.begin_questions().unwrap();
        wizard.load_questions(vec![question("a")]);
        answer(&mut wizard, LikertLabel::Sempre);
        assert_eq!(wizard.stage(), Stage::Review);

        assert!(wizard.redo());
        assert_eq!(wizard.stage(), Stage::Questions);
        assert_eq!(wizard.index(), 0);
        assert!(wizard.answers().is_empty());
        assert!(wizard.questions_loaded());
        assert_eq!(wizard.begin_questions(), Ok(BeginOutcome::Ready));
    }

    #[test]
    fn test_stale_commit_ignored() {
        let mut wizard = filled();
        wizard.begin_questions().unwrap();
        wizard.load_questions(vec![question("a"), question("b")]);
        wizard.select(LikertLabel::Nunca);
        let mut row = wizard.pending_answer("p").unwrap();
        row.id_questao = "b".into();
        assert_eq!(wizard.commit_answer(&row), Advance::Stale);
        assert_eq!(wizard.index(), 0);
    }
}
