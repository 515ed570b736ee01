//! Local draft list for the question registry
//!
//! Drafts live only in memory until saved in one bulk insert.

use uuid::Uuid;

use super::error::ValidationError;
use super::model::{Dimension, NewQuestion, Polarity, Profile};

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub id: Uuid,
    pub pergunta: String,
    pub sentido: Polarity,
    pub dimensao: Dimension,
}

#[derive(Debug, Clone, Default)]
pub struct DraftList {
    drafts: Vec<QuestionDraft>,
}

impl DraftList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drafts(&self) -> &[QuestionDraft] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Append a draft; the text is stored as typed, only checked for content
    pub fn add(&mut self, pergunta: &str, sentido: Polarity, dimensao: Dimension) -> Result<Uuid, ValidationError> {
        if pergunta.trim().is_empty() {
            return Err(ValidationError::EmptyQuestionText);
        }
        let id = Uuid::new_v4();
        self.drafts.push(QuestionDraft {
            id,
            pergunta: pergunta.to_string(),
            sentido,
            dimensao,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.drafts.len();
        self.drafts.retain(|draft| draft.id != id);
        self.drafts.len() != before
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    /// Insert payloads stamped with the creator
    pub fn to_new_questions(&self, user_id: &str, profile: &Profile) -> Result<Vec<NewQuestion>, ValidationError> {
        if self.drafts.is_empty() {
            return Err(ValidationError::NoDraftQuestions);
        }
        Ok(self
            .drafts
            .iter()
            .map(|draft| NewQuestion {
                organizacao: profile.organization.clone().unwrap_or_default(),
                cadastrado_por: user_id.to_string(),
                cadastrado_por_nome: profile.full_name.clone().unwrap_or_default(),
                pergunta: draft.pergunta.clone(),
                sentido: draft.sentido,
                dimensao: draft.dimensao,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_requires_text() {
        let mut drafts = DraftList::new();
        assert_eq!(
            drafts.add("   ", Polarity::Positivo, Dimension::Demands),
            Err(ValidationError::EmptyQuestionText)
        );
        assert!(drafts.is_empty());
    }

    #[test]
    fn test_remove_by_id() {
        let mut drafts = DraftList::new();
        let first = drafts.add("Tenho autonomia", Polarity::Positivo, Dimension::Control).unwrap();
        drafts.add("Sofro pressão", Polarity::Negativo, Dimension::Demands).unwrap();

        assert!(drafts.remove(first));
        assert!(!drafts.remove(first));
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts.drafts()[0].pergunta, "Sofro pressão");
    }

    #[test]
    fn test_stamped_payloads() {
        let mut drafts = DraftList::new();
        assert_eq!(
            drafts.to_new_questions("u-1", &Profile::default()),
            Err(ValidationError::NoDraftQuestions)
        );

        drafts.add("Tenho autonomia", Polarity::Positivo, Dimension::Control).unwrap();
        let profile = Profile {
            full_name: Some("Ana Souza".into()),
            organization: Some("ACME".into()),
        };
        let rows = drafts.to_new_questions("u-1", &profile).unwrap();
        assert_eq!(rows[0].organizacao, "ACME");
        assert_eq!(rows[0].cadastrado_por, "u-1");
        assert_eq!(rows[0].cadastrado_por_nome, "Ana Souza");
        assert_eq!(rows[0].dimensao, Dimension::Control);
    }
}
