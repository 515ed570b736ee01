//! Sign in / sign up

use crossterm::event::KeyCode;
use ratatui::style::{Style, Stylize};

use crate::api::{SignUpOutcome, SignUpRequest};
use crate::auth::credentials::{validate_sign_in, validate_sign_up};
use crate::tui::apps::{error_text, page_header};
use crate::tui::{
    App, AppContext, Command, Element, LayoutConstraint, Notice, Route, Subscription, TextInputState, Theme,
};

pub struct AuthApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone)]
pub struct State {
    mode: Mode,
    full_name: String,
    full_name_input: TextInputState,
    organization: String,
    organization_input: TextInputState,
    email: String,
    email_input: TextInputState,
    password: String,
    password_input: TextInputState,
    submitting: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            mode: Mode::SignIn,
            full_name: String::new(),
            full_name_input: TextInputState::new(),
            organization: String::new(),
            organization_input: TextInputState::new(),
            email: String::new(),
            email_input: TextInputState::new(),
            password: String::new(),
            password_input: TextInputState::new(),
            submitting: false,
        }
    }
}

impl State {
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    ToggleMode,
    FullNameEvent(KeyCode),
    OrganizationEvent(KeyCode),
    EmailEvent(KeyCode),
    PasswordEvent(KeyCode),
    Submit,
    SignedIn(Result<(), String>),
    SignedUp(Result<SignUpOutcome, String>),
}

impl AuthApp {
    fn submit(state: &mut State, ctx: &AppContext) -> Command<Msg> {
        if state.submitting {
            return Command::None;
        }

        match state.mode {
            Mode::SignIn => {
                if let Err(e) = validate_sign_in(&state.email, &state.password) {
                    log::debug!("Sign in rejected: {}", e);
                    return Command::notify(Notice::warning(e.to_string()));
                }
                state.submitting = true;
                let session = ctx.session.clone();
                let email = state.email.clone();
                let password = state.password.clone();
                Command::perform(
                    async move {
                        session
                            .sign_in(&email, &password)
                            .await
                            .map(|_| ())
                            .map_err(|e| error_text(&e))
                    },
                    Msg::SignedIn,
                )
            }
            Mode::SignUp => {
                let request = SignUpRequest {
                    email: state.email.trim().to_string(),
                    password: state.password.clone(),
                    full_name: state.full_name.trim().to_string(),
                    organization: state.organization.trim().to_string(),
                };
                if let Err(e) = validate_sign_up(&request) {
                    log::debug!("Sign up rejected: {}", e);
                    return Command::notify(Notice::warning(e.to_string()));
                }
                state.submitting = true;
                let session = ctx.session.clone();
                Command::perform(
                    async move { session.sign_up(&request).await.map_err(|e| error_text(&e)) },
                    Msg::SignedUp,
                )
            }
        }
    }
}

impl App for AuthApp {
    type State = State;
    type Msg = Msg;

    fn init(_ctx: &AppContext) -> (State, Command<Msg>) {
        (State::default(), Command::set_focus("auth-email"))
    }

    fn update(state: &mut State, msg: Msg, ctx: &AppContext) -> Command<Msg> {
        match msg {
            Msg::ToggleMode => {
                state.mode = match state.mode {
                    Mode::SignIn => Mode::SignUp,
                    Mode::SignUp => Mode::SignIn,
                };
                let first = match state.mode {
                    Mode::SignIn => "auth-email",
                    Mode::SignUp => "auth-full-name",
                };
                Command::set_focus(first)
            }
            Msg::FullNameEvent(key) => {
                state.full_name_input.apply(key, &mut state.full_name);
                Command::None
            }
            Msg::OrganizationEvent(key) => {
                state.organization_input.apply(key, &mut state.organization);
                Command::None
            }
            Msg::EmailEvent(key) => {
                state.email_input.apply(key, &mut state.email);
                Command::None
            }
            Msg::PasswordEvent(key) => {
                state.password_input.apply(key, &mut state.password);
                Command::None
            }
            Msg::Submit => Self::submit(state, ctx),
            Msg::SignedIn(Ok(())) => {
                state.submitting = false;
                Command::notify_and_navigate(Notice::success("Login realizado com sucesso!"), Route::Dashboard)
            }
            Msg::SignedUp(Ok(SignUpOutcome::SignedIn(_))) => {
                state.submitting = false;
                Command::notify_and_navigate(Notice::success("Cadastro realizado com sucesso!"), Route::Dashboard)
            }
            Msg::SignedUp(Ok(SignUpOutcome::ConfirmationRequired { email })) => {
                state.submitting = false;
                state.mode = Mode::SignIn;
                state.password.clear();
                state.password_input.reset();
                Command::notify(Notice::info(format!(
                    "Cadastro realizado! Confirme seu e-mail ({}) antes de entrar.",
                    email
                )))
            }
            Msg::SignedIn(Err(e)) => {
                state.submitting = false;
                Command::notify(Notice::error(format!("Erro ao entrar: {}", e)))
            }
            Msg::SignedUp(Err(e)) => {
                state.submitting = false;
                Command::notify(Notice::error(format!("Erro ao cadastrar: {}", e)))
            }
        }
    }

    fn view(state: &State, _ctx: &AppContext, theme: &Theme) -> Element<Msg> {
        let (title, subtitle, submit_label, toggle_label) = match state.mode {
            Mode::SignIn => ("Entrar", "Acesse sua conta", "Entrar", "Não tem conta? Cadastre-se"),
            Mode::SignUp => ("Criar Conta", "Cadastre-se para começar", "Cadastrar", "Já tem conta? Entrar"),
        };

        let field = |label: &'static str, input: Element<Msg>| {
            Element::column(Vec::new())
                .add(Element::styled(label, Style::default().fg(theme.text_secondary)), LayoutConstraint::Length(1))
                .add(Element::panel(input).build(), LayoutConstraint::Length(3))
                .spacing(0)
                .build()
        };

        let mut form = Element::column(Vec::new()).spacing(0);
        if state.mode == Mode::SignUp {
            form = form
                .add(
                    field(
                        "Nome completo",
                        Element::text_input("auth-full-name", &state.full_name, &state.full_name_input)
                            .placeholder("Seu nome")
                            .on_change(Msg::FullNameEvent)
                            .on_submit(Msg::Submit)
                            .build(),
                    ),
                    LayoutConstraint::Length(4),
                )
                .add(
                    field(
                        "Organização",
                        Element::text_input("auth-organization", &state.organization, &state.organization_input)
                            .placeholder("Nome da empresa")
                            .on_change(Msg::OrganizationEvent)
                            .on_submit(Msg::Submit)
                            .build(),
                    ),
                    LayoutConstraint::Length(4),
                );
        }
        form = form
            .add(
                field(
                    "E-mail",
                    Element::text_input("auth-email", &state.email, &state.email_input)
                        .placeholder("voce@empresa.com")
                        .on_change(Msg::EmailEvent)
                        .on_submit(Msg::Submit)
                        .build(),
                ),
                LayoutConstraint::Length(4),
            )
            .add(
                field(
                    "Senha",
                    Element::text_input("auth-password", &state.password, &state.password_input)
                        .placeholder("Mínimo de 6 caracteres")
                        .masked(true)
                        .on_change(Msg::PasswordEvent)
                        .on_submit(Msg::Submit)
                        .build(),
                ),
                LayoutConstraint::Length(4),
            );

        let submit_label = if state.submitting { "Aguarde..." } else { submit_label };
        let actions = Element::row(vec![
            Element::button("auth-submit", submit_label)
                .on_press(Msg::Submit)
                .style(Style::default().fg(theme.accent_primary).bold())
                .build(),
            Element::button("auth-toggle", toggle_label).on_press(Msg::ToggleMode).build(),
        ])
        .build();

        Element::container(
            Element::column(Vec::new())
                .add(page_header(title, subtitle, theme), LayoutConstraint::Length(2))
                .add(form.build(), LayoutConstraint::Fill(1))
                .add(actions, LayoutConstraint::Length(3))
                .build(),
        )
        .build()
    }

    fn subscriptions(_state: &State) -> Vec<Subscription<Msg>> {
        vec![
            Subscription::ctrl_key(KeyCode::Char('t'), "Alternar entrar/cadastrar", Msg::ToggleMode),
            Subscription::keyboard(KeyCode::Enter, "Enviar", Msg::Submit),
        ]
    }

    fn title() -> &'static str {
        "Acesso"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryBackend;
    use crate::tui::apps::testing;
    use crate::tui::{Effect, Runtime};

    fn type_text(runtime: &mut Runtime<AuthApp>, ctx: &AppContext, to_msg: fn(KeyCode) -> Msg, text: &str) {
        for c in text.chars() {
            runtime.dispatch(to_msg(KeyCode::Char(c)), ctx);
        }
    }

    #[tokio::test]
    async fn test_sign_in_navigates_to_dashboard() {
        let backend = MemoryBackend::new();
        backend.add_user("ana@acme.com", testing::PASSWORD, "Ana Souza", "ACME");
        let ctx = testing::context(&backend).await;
        let mut runtime = Runtime::<AuthApp>::new(&ctx);

        type_text(&mut runtime, &ctx, Msg::EmailEvent, "ana@acme.com");
        type_text(&mut runtime, &ctx, Msg::PasswordEvent, testing::PASSWORD);
        runtime.dispatch(Msg::Submit, &ctx);
        runtime.settle(&ctx).await;

        assert!(ctx.session.current_user().is_some());
        assert_eq!(
            runtime.take_effects(),
            vec![
                Effect::Notify(Notice::success("Login realizado com sucesso!")),
                Effect::Navigate(Route::Dashboard),
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_locally() {
        let backend = MemoryBackend::new();
        let ctx = testing::context(&backend).await;
        let mut runtime = Runtime::<AuthApp>::new(&ctx);

        runtime.dispatch(Msg::Submit, &ctx);
        assert_eq!(runtime.in_flight(), 0);
        assert_eq!(
            runtime.take_effects(),
            vec![Effect::Notify(Notice::warning("Por favor, preencha todos os campos"))]
        );

        type_text(&mut runtime, &ctx, Msg::EmailEvent, "ana-acme.com");
        type_text(&mut runtime, &ctx, Msg::PasswordEvent, testing::PASSWORD);
        runtime.dispatch(Msg::Submit, &ctx);
        assert_eq!(
            runtime.take_effects(),
            vec![Effect::Notify(Notice::warning("Informe um e-mail válido"))]
        );
    }

    #[tokio::test]
    async fn test_wrong_password_shows_error() {
        let backend = MemoryBackend::new();
        backend.add_user("ana@acme.com", testing::PASSWORD, "Ana Souza", "ACME");
        let ctx = testing::context(&backend).await;
        let mut runtime = Runtime::<AuthApp>::new(&ctx);

        type_text(&mut runtime, &ctx, Msg::EmailEvent, "ana@acme.com");
        type_text(&mut runtime, &ctx, Msg::PasswordEvent, "errada123");
        runtime.dispatch(Msg::Submit, &ctx);
        runtime.settle(&ctx).await;

        let effects = runtime.take_effects();
        assert!(matches!(&effects[..], [Effect::Notify(n)] if n.message.contains("Invalid login credentials")));
        assert!(ctx.session.current_user().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_requiring_confirmation_returns_to_sign_in() {
        let backend = MemoryBackend::new();
        backend.require_email_confirmation(true);
        let ctx = testing::context(&backend).await;
        let mut runtime = Runtime::<AuthApp>::new(&ctx);

        runtime.dispatch(Msg::ToggleMode, &ctx);
        type_text(&mut runtime, &ctx, Msg::FullNameEvent, "Bia Lima");
        type_text(&mut runtime, &ctx, Msg::OrganizationEvent, "ACME");
        type_text(&mut runtime, &ctx, Msg::EmailEvent, "bia@acme.com");
        type_text(&mut runtime, &ctx, Msg::PasswordEvent, "segredo2");
        runtime.dispatch(Msg::Submit, &ctx);
        runtime.settle(&ctx).await;

        assert_eq!(runtime.state().mode(), Mode::SignIn);
        assert!(ctx.session.current_user().is_none());
        let effects = runtime.take_effects();
        assert!(matches!(&effects[..], [Effect::Notify(n)] if n.message.contains("bia@acme.com")));
    }
}
