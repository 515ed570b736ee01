//! Seed data for the offline demo backend

use serde_json::json;

use crate::api::MemoryBackend;
use crate::api::constants::tables;

use super::model::{Dimension, Polarity};

pub const DEMO_ORGANIZATION: &str = "Empresa Demo";
pub const DEMO_PASSWORD: &str = "demo123";
pub const ADMIN_EMAIL: &str = "admin@demo.local";
pub const PARTICIPANT_EMAIL: &str = "participante@demo.local";

const SAMPLE_QUESTIONS: [(&str, Polarity, Dimension); 7] = [
    (
        "Tenho prazos impossíveis de cumprir",
        Polarity::Negativo,
        Dimension::Demands,
    ),
    (
        "Posso decidir quando fazer uma pausa",
        Polarity::Positivo,
        Dimension::Control,
    ),
    (
        "Posso contar com meu chefe para me ajudar com um problema de trabalho",
        Polarity::Positivo,
        Dimension::ManagerSupport,
    ),
    (
        "Meus colegas me ajudam se o trabalho fica difícil",
        Polarity::Positivo,
        Dimension::PeerSupport,
    ),
    (
        "Sou perseguido(a) no trabalho",
        Polarity::Negativo,
        Dimension::Relationships,
    ),
    (
        "Tenho clareza do que se espera de mim no trabalho",
        Polarity::Positivo,
        Dimension::Role,
    ),
    (
        "Tenho oportunidades de questionar meus superiores sobre mudanças no trabalho",
        Polarity::Positivo,
        Dimension::Change,
    ),
];

const SAMPLE_AREAS: [&str; 3] = ["Administrativo", "Operações", "Recursos Humanos"];

/// Populate a fresh memory backend with an admin, a participant, one question
/// per dimension and a few areas
pub fn seed(backend: &MemoryBackend) {
    let admin = backend.add_user(ADMIN_EMAIL, DEMO_PASSWORD, "Administrador Demo", DEMO_ORGANIZATION);
    backend.grant_role(&admin.id, "admin");
    backend.add_user(PARTICIPANT_EMAIL, DEMO_PASSWORD, "Participante Demo", DEMO_ORGANIZATION);

    let questions = SAMPLE_QUESTIONS
        .iter()
        .map(|(pergunta, sentido, dimensao)| {
            json!({
                "pergunta": pergunta,
                "sentido": sentido,
                "dimensao": dimensao,
                "organizacao": DEMO_ORGANIZATION,
                "cadastrado_por": admin.id,
                "cadastrado_por_nome": "Administrador Demo",
            })
        })
        .collect();
    backend.seed(tables::QUESTIONS, questions);

    let areas = SAMPLE_AREAS
        .iter()
        .map(|nome_area| {
            json!({
                "nome_area": nome_area,
                "organizacao": DEMO_ORGANIZATION,
                "cadastrado_por": admin.id,
                "cadastrado_por_nome": "Administrador Demo",
            })
        })
        .collect();
    backend.seed(tables::AREAS, areas);

    log::info!(
        "Seeded demo backend: {} questions, {} areas",
        SAMPLE_QUESTIONS.len(),
        SAMPLE_AREAS.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthApi;
    use crate::survey::model::Question;

    #[tokio::test]
    async fn test_seed_covers_every_dimension() {
        let backend = MemoryBackend::new();
        seed(&backend);

        let questions: Vec<Question> = backend
            .rows(tables::QUESTIONS)
            .into_iter()
            .map(|row| serde_json::from_value(row).unwrap())
            .collect();
        for dimension in Dimension::ALL {
            assert!(questions.iter().any(|q| q.dimensao == dimension));
        }

        let session = backend.sign_in_with_password(ADMIN_EMAIL, DEMO_PASSWORD).await.unwrap();
        let roles = backend.rows(tables::USER_ROLES);
        assert_eq!(roles[0]["user_id"], json!(session.user.id));
    }
}
