//! Survey domain types and the fixed option lists of the HSE-IT instrument

use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-point Likert scale used by every question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikertLabel {
    Nunca,
    Raramente,
    AsVezes,
    Frequentemente,
    Sempre,
}

impl LikertLabel {
    pub const ALL: [LikertLabel; 5] = [
        LikertLabel::Nunca,
        LikertLabel::Raramente,
        LikertLabel::AsVezes,
        LikertLabel::Frequentemente,
        LikertLabel::Sempre,
    ];

    /// Numeric score stored alongside the label
    pub fn value(self) -> i32 {
        match self {
            LikertLabel::Nunca => 1,
            LikertLabel::Raramente => 2,
            LikertLabel::AsVezes => 3,
            LikertLabel::Frequentemente => 4,
            LikertLabel::Sempre => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LikertLabel::Nunca => "Nunca",
            LikertLabel::Raramente => "Raramente",
            LikertLabel::AsVezes => "Às vezes",
            LikertLabel::Frequentemente => "Frequentemente",
            LikertLabel::Sempre => "Sempre",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }
}

impl fmt::Display for LikertLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether agreement with a statement indicates lower or higher risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positivo,
    Negativo,
}

impl Polarity {
    pub const ALL: [Polarity; 2] = [Polarity::Positivo, Polarity::Negativo];

    pub fn label(self) -> &'static str {
        match self {
            Polarity::Positivo => "Positivo",
            Polarity::Negativo => "Negativo",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The seven HSE-IT dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "DEMANDAS DE TRABALHO")]
    Demands,
    #[serde(rename = "CONTROLE SOBRE O TRABALHO")]
    Control,
    #[serde(rename = "APOIO DA CHEFIA")]
    ManagerSupport,
    #[serde(rename = "APOIO DOS COLEGAS")]
    PeerSupport,
    #[serde(rename = "RELACIONAMENTOS NO TRABALHO")]
    Relationships,
    #[serde(rename = "CLAREZA DO CARGO E OBJETIVOS")]
    Role,
    #[serde(rename = "COMUNICAÇÃO E MUDANÇAS ORGANIZACIONAIS")]
    Change,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Demands,
        Dimension::Control,
        Dimension::ManagerSupport,
        Dimension::PeerSupport,
        Dimension::Relationships,
        Dimension::Role,
        Dimension::Change,
    ];

    /// Label stored in the `dimensao` column
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Demands => "DEMANDAS DE TRABALHO",
            Dimension::Control => "CONTROLE SOBRE O TRABALHO",
            Dimension::ManagerSupport => "APOIO DA CHEFIA",
            Dimension::PeerSupport => "APOIO DOS COLEGAS",
            Dimension::Relationships => "RELACIONAMENTOS NO TRABALHO",
            Dimension::Role => "CLAREZA DO CARGO E OBJETIVOS",
            Dimension::Change => "COMUNICAÇÃO E MUDANÇAS ORGANIZACIONAIS",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Dimension::Demands => "Carga de trabalho, padrões e ambiente de trabalho",
            Dimension::Control => "Autonomia sobre a forma de realizar o trabalho",
            Dimension::ManagerSupport => "Incentivo e recursos fornecidos pela liderança",
            Dimension::PeerSupport => "Apoio oferecido pelos colegas de trabalho",
            Dimension::Relationships => "Promoção de práticas positivas e combate a conflitos",
            Dimension::Role => "Compreensão do papel e ausência de conflito de funções",
            Dimension::Change => "Gestão e comunicação de mudanças na organização",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row of `questoes_cadastradas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub pergunta: String,
    pub sentido: Polarity,
    pub dimensao: Dimension,
    #[serde(default)]
    pub organizacao: Option<String>,
    #[serde(default)]
    pub cadastrado_por_nome: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload for `questoes_cadastradas`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuestion {
    pub organizacao: String,
    pub cadastrado_por: String,
    pub cadastrado_por_nome: String,
    pub pergunta: String,
    pub sentido: Polarity,
    pub dimensao: Dimension,
}

/// Row of `areas_cadastradas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub nome_area: String,
    #[serde(default)]
    pub organizacao: Option<String>,
    #[serde(default)]
    pub cadastrado_por_nome: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload for `areas_cadastradas`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewArea {
    pub nome_area: String,
    pub organizacao: String,
    pub cadastrado_por: String,
    pub cadastrado_por_nome: String,
}

/// Row of `profiles` (only the columns the survey reads)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// Insert payload for `respostas_questionario`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRow {
    pub id_participante: String,
    pub id_questao: String,
    pub resposta_texto: String,
    pub valor: i32,
    pub sentido: Polarity,
    pub dimensao: Dimension,
    pub sexo: String,
    pub faixa_etaria: String,
    pub setor: String,
    pub tempo_empresa: String,
}

pub const SEX_OPTIONS: [&str; 4] = ["Masculino", "Feminino", "Outro", "Prefiro não informar"];

pub const AGE_BANDS: [&str; 6] = ["14-20", "20-30", "30-40", "40-50", "50-60", "60+"];

pub const TENURE_BANDS: [&str; 5] = [
    "Menos de 1 ano",
    "1-3 anos",
    "3-5 anos",
    "5-10 anos",
    "Mais de 10 anos",
];

/// Participant profile captured before the questions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    pub sexo: String,
    pub faixa_etaria: String,
    pub setor: String,
    pub tempo_empresa: String,
}

impl Demographics {
    pub fn is_complete(&self) -> bool {
        [&self.sexo, &self.faixa_etaria, &self.setor, &self.tempo_empresa]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_likert_mapping() {
        let pairs: Vec<(&str, i32)> = LikertLabel::ALL.iter().map(|l| (l.label(), l.value())).collect();
        assert_eq!(
            pairs,
            vec![
                ("Nunca", 1),
                ("Raramente", 2),
                ("Às vezes", 3),
                ("Frequentemente", 4),
                ("Sempre", 5),
            ]
        );
        assert_eq!(LikertLabel::from_label("Às vezes"), Some(LikertLabel::AsVezes));
        assert_eq!(LikertLabel::from_label("Talvez"), None);
    }

    #[test]
    fn test_question_row_decodes_dimension_labels() {
        let row = json!({
            "id": "q1",
            "pergunta": "Tenho prazos impossíveis de cumprir",
            "sentido": "Negativo",
            "dimensao": "COMUNICAÇÃO E MUDANÇAS ORGANIZACIONAIS",
            "created_at": "2024-01-01T00:00:01+00:00"
        });
        let question: Question = serde_json::from_value(row).unwrap();
        assert_eq!(question.sentido, Polarity::Negativo);
        assert_eq!(question.dimensao, Dimension::Change);
        assert_eq!(question.organizacao, None);
    }

    #[test]
    fn test_dimension_serialization_matches_label() {
        for dimension in Dimension::ALL {
            assert_eq!(serde_json::to_value(dimension).unwrap(), json!(dimension.label()));
        }
    }

    #[test]
    fn test_demographics_completeness() {
        let mut demographics = Demographics {
            sexo: "Feminino".into(),
            faixa_etaria: "30-40".into(),
            setor: "RH".into(),
            tempo_empresa: "1-3 anos".into(),
        };
        assert!(demographics.is_complete());

        demographics.setor = "   ".into();
        assert!(!demographics.is_complete());
    }
}
