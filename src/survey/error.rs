use thiserror::Error;

/// User-input problems; the message is what the participant sees
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, preencha todos os campos")]
    IncompleteDemographics,

    #[error("Por favor, selecione uma resposta")]
    NoAnswerSelected,

    #[error("Nenhuma questão em andamento")]
    NoActiveQuestion,

    #[error("Por favor, preencha a pergunta")]
    EmptyQuestionText,

    #[error("Adicione pelo menos uma questão antes de salvar")]
    NoDraftQuestions,

    #[error("Por favor, preencha o nome da área")]
    EmptyAreaName,

    #[error("Por favor, preencha todos os campos")]
    MissingCredentials,

    #[error("Informe um e-mail válido")]
    InvalidEmail,

    #[error("A senha deve ter pelo menos 6 caracteres")]
    PasswordTooShort,
}
