//! Survey table access against the in-memory backend

use anyhow::Result;
use hseit_risk::api::MemoryBackend;
use hseit_risk::api::constants::tables;
use hseit_risk::survey::repository::{answers, areas, profiles, questions};
use hseit_risk::survey::{AnswerRow, Dimension, DraftList, NewArea, Polarity, Profile};
use serde_json::json;

#[tokio::test]
async fn test_question_orderings() -> Result<()> {
    let backend = MemoryBackend::new();
    backend.seed(
        tables::QUESTIONS,
        vec![
            json!({ "pergunta": "primeira", "sentido": "Positivo", "dimensao": "CLAREZA DO CARGO E OBJETIVOS" }),
            json!({ "pergunta": "segunda", "sentido": "Negativo", "dimensao": "COMUNICAÇÃO E MUDANÇAS ORGANIZACIONAIS" }),
        ],
    );

    let survey: Vec<String> = questions::list_for_survey(&backend)
        .await?
        .into_iter()
        .map(|q| q.pergunta)
        .collect();
    assert_eq!(survey, vec!["primeira", "segunda"]);

    let recent = questions::list_recent(&backend).await?;
    assert_eq!(recent[0].pergunta, "segunda");
    assert_eq!(recent[0].sentido, Polarity::Negativo);
    assert_eq!(recent[0].dimensao, Dimension::Change);
    Ok(())
}

#[tokio::test]
async fn test_drafts_are_stamped_with_profile() -> Result<()> {
    let backend = MemoryBackend::new();
    let user = backend.add_user("ana@acme.com", "segredo1", "Ana Souza", "ACME");

    let profile = profiles::require(&backend, &user.id).await?;
    assert_eq!(
        profile,
        Profile {
            full_name: Some("Ana Souza".into()),
            organization: Some("ACME".into()),
        }
    );

    let mut drafts = DraftList::new();
    drafts.add("Tenho prazos apertados", Polarity::Negativo, Dimension::Demands)?;
    drafts.add("Meu chefe me apoia", Polarity::Positivo, Dimension::ManagerSupport)?;
    let inserted = questions::insert_many(&backend, &drafts.to_new_questions(&user.id, &profile)?).await?;
    assert_eq!(inserted, 2);

    let rows = backend.rows(tables::QUESTIONS);
    assert!(rows.iter().all(|row| row["cadastrado_por"] == user.id.as_str()));
    assert_eq!(rows[1]["dimensao"], "APOIO DA CHEFIA");
    Ok(())
}

#[tokio::test]
async fn test_missing_profile_is_an_error() -> Result<()> {
    let backend = MemoryBackend::new();
    assert_eq!(profiles::get(&backend, "nobody").await?, None);
    let err = profiles::require(&backend, "nobody").await.unwrap_err();
    assert!(format!("{:#}", err).contains("Perfil não encontrado"));
    Ok(())
}

#[tokio::test]
async fn test_areas_by_name_and_delete() -> Result<()> {
    let backend = MemoryBackend::new();
    for name in ["Operações", "Administrativo"] {
        areas::insert(
            &backend,
            &NewArea {
                nome_area: name.into(),
                organizacao: "ACME".into(),
                cadastrado_por: "u1".into(),
                cadastrado_por_nome: "Ana".into(),
            },
        )
        .await?;
    }

    let by_name = areas::list_by_name(&backend).await?;
    assert_eq!(by_name[0].nome_area, "Administrativo");
    let recent = areas::list_recent(&backend).await?;
    assert_eq!(recent[0].nome_area, "Administrativo");

    areas::delete(&backend, &by_name[0].id).await?;
    let remaining = areas::list_by_name(&backend).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].nome_area, "Operações");
    Ok(())
}

#[tokio::test]
async fn test_answer_insert_and_failure() -> Result<()> {
    let backend = MemoryBackend::new();
    let row = AnswerRow {
        id_participante: "u1".into(),
        id_questao: "q1".into(),
        resposta_texto: "Frequentemente".into(),
        valor: 4,
        sentido: Polarity::Positivo,
        dimensao: Dimension::PeerSupport,
        sexo: "Feminino".into(),
        faixa_etaria: "20-30".into(),
        setor: "TI".into(),
        tempo_empresa: "1-3 anos".into(),
    };

    answers::insert(&backend, &row).await?;
    let stored = backend.rows(tables::ANSWERS);
    assert_eq!(stored[0]["valor"], 4);
    assert_eq!(stored[0]["dimensao"], "APOIO DOS COLEGAS");

    backend.fail_table(tables::ANSWERS, "violates row-level security policy");
    let err = answers::insert(&backend, &row).await.unwrap_err();
    assert!(format!("{:#}", err).contains("row-level security"));
    assert_eq!(backend.rows(tables::ANSWERS).len(), 1);
    Ok(())
}
