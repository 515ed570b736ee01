use ratatui::layout::Alignment;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use crate::tui::{App, AppContext, Command, Element, LayoutConstraint, Route, Theme};

pub struct NotFoundApp;

#[derive(Debug, Clone)]
pub struct State {
    path: String,
}

#[derive(Debug, Clone)]
pub enum Msg {
    GoHome,
}

impl App for NotFoundApp {
    type State = State;
    type Msg = Msg;

    fn init(ctx: &AppContext) -> (State, Command<Msg>) {
        let path = ctx.route.path().to_string();
        log::warn!("404: attempted to open non-existent route {}", path);
        (State { path }, Command::set_focus("go-home"))
    }

    fn update(_state: &mut State, msg: Msg, _ctx: &AppContext) -> Command<Msg> {
        match msg {
            Msg::GoHome => Command::navigate(Route::Landing),
        }
    }

    fn view(state: &State, _ctx: &AppContext, theme: &Theme) -> Element<Msg> {
        let lines = vec![
            Line::from(Span::styled("404", Style::default().fg(theme.accent_error).bold())).alignment(Alignment::Center),
            Line::from(Span::styled("Página não encontrada", theme.heading())).alignment(Alignment::Center),
            Line::from(Span::styled(state.path.clone(), theme.muted())).alignment(Alignment::Center),
        ];

        Element::container(
            Element::column(Vec::new())
                .add(Element::paragraph(lines), LayoutConstraint::Length(3))
                .add(
                    Element::button("go-home", "Voltar ao início").on_press(Msg::GoHome).build(),
                    LayoutConstraint::Length(3),
                )
                .build(),
        )
        .padding(2)
        .build()
    }

    fn title() -> &'static str {
        "Não encontrado"
    }
}
