//! Participant welcome screen

use ratatui::layout::Alignment;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use crate::tui::{App, AppContext, Command, Element, LayoutConstraint, Notice, Route, Theme};

pub struct WelcomeApp;

#[derive(Debug, Clone, Default)]
pub struct State;

#[derive(Debug, Clone)]
pub enum Msg {
    StartQuestionnaire,
    LearnMore,
}

const HIGHLIGHTS: [(&str, &str); 3] = [
    ("Confidencial", "Suas respostas são totalmente confidenciais e anônimas"),
    ("Simples", "Perguntas diretas e fáceis de responder"),
    ("Rápido", "Aproximadamente 15 minutos para concluir"),
];

impl App for WelcomeApp {
    type State = State;
    type Msg = Msg;

    fn init(_ctx: &AppContext) -> (State, Command<Msg>) {
        (State, Command::set_focus("start-questionnaire"))
    }

    fn update(_state: &mut State, msg: Msg, _ctx: &AppContext) -> Command<Msg> {
        match msg {
            Msg::StartQuestionnaire => Command::navigate(Route::Questionnaire),
            Msg::LearnMore => Command::notify(Notice::info("Funcionalidade 'Saiba Mais' será implementada em breve")),
        }
    }

    fn view(_state: &State, _ctx: &AppContext, theme: &Theme) -> Element<Msg> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Mostre-nos como você se sente",
                Style::default().fg(theme.accent_primary).bold(),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
            Line::from(Span::styled(
                "Sua voz importa. Responda ao questionário e ajude a construir um ambiente de trabalho melhor para todos.",
                Style::default().fg(theme.text_secondary),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
        ];
        for (title, description) in HIGHLIGHTS {
            lines.push(
                Line::from(vec![
                    Span::styled(format!("{}: ", title), Style::default().fg(theme.accent_secondary).bold()),
                    Span::styled(description, theme.muted()),
                ])
                .alignment(Alignment::Center),
            );
        }

        let actions = Element::row(vec![
            Element::button("start-questionnaire", "Iniciar Questionário →")
                .on_press(Msg::StartQuestionnaire)
                .style(Style::default().fg(theme.accent_primary).bold())
                .build(),
            Element::button("learn-more", "Saiba Mais").on_press(Msg::LearnMore).build(),
        ])
        .build();

        Element::container(
            Element::column(Vec::new())
                .add(Element::paragraph(lines), LayoutConstraint::Min(8))
                .add(actions, LayoutConstraint::Length(3))
                .build(),
        )
        .padding(2)
        .build()
    }

    fn title() -> &'static str {
        "Boas-vindas"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryBackend;
    use crate::tui::apps::testing;
    use crate::tui::{Effect, Runtime};

    #[tokio::test]
    async fn test_actions() {
        let backend = MemoryBackend::new();
        let ctx = testing::signed_in(&backend, "ana@acme.com", false).await;
        let mut runtime = Runtime::<WelcomeApp>::new(&ctx);

        runtime.dispatch(Msg::LearnMore, &ctx);
        runtime.dispatch(Msg::StartQuestionnaire, &ctx);
        assert_eq!(
            runtime.take_effects(),
            vec![
                Effect::Notify(Notice::info("Funcionalidade 'Saiba Mais' será implementada em breve")),
                Effect::Navigate(Route::Questionnaire),
            ]
        );
    }
}
