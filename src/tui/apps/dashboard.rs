//! Signed-in home: admin shortcuts plus the instrument catalogue

use crossterm::event::KeyCode;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use crate::survey::catalog::{INSTRUMENTS, Instrument};
use crate::tui::apps::first_name;
use crate::tui::{
    App, AppContext, Command, Element, LayoutConstraint, ListItem, ListState, Notice, Route, Subscription, Theme,
};

pub struct DashboardApp;

impl ListItem for Instrument {
    fn to_element<Msg>(&self, is_selected: bool, theme: &Theme) -> Element<Msg> {
        let name_style = if is_selected {
            Style::default().fg(theme.accent_primary).bold()
        } else {
            Style::default().fg(theme.text_primary).bold()
        };
        Element::styled_text(Line::from(vec![
            Span::styled(format!(" {:<8}", self.name), name_style),
            Span::styled(self.description, theme.muted()),
        ]))
    }
}

#[derive(Debug, Clone)]
pub struct State {
    instruments: ListState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            instruments: ListState::with_selection(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    Open(Route),
    DefineParameters,
    InstrumentNavigate(KeyCode),
    InstrumentSelect(usize),
    StartInstrument,
}

impl App for DashboardApp {
    type State = State;
    type Msg = Msg;

    fn init(_ctx: &AppContext) -> (State, Command<Msg>) {
        (State::default(), Command::set_focus("instrument-list"))
    }

    fn update(state: &mut State, msg: Msg, _ctx: &AppContext) -> Command<Msg> {
        match msg {
            Msg::Open(route) => Command::navigate(route),
            Msg::DefineParameters => Command::notify(Notice::info("Em desenvolvimento")),
            Msg::InstrumentNavigate(key) => {
                state.instruments.handle_key(key, INSTRUMENTS.len());
                Command::None
            }
            Msg::InstrumentSelect(index) => {
                state.instruments.select(Some(index));
                Command::None
            }
            Msg::StartInstrument => {
                if let Some(instrument) = state.instruments.selected().and_then(|i| INSTRUMENTS.get(i)) {
                    log::info!("Starting questionnaire for instrument {}", instrument.id);
                }
                Command::navigate(Route::Questionnaire)
            }
        }
    }

    fn view(state: &State, ctx: &AppContext, theme: &Theme) -> Element<Msg> {
        let name = ctx.user().map(|user| first_name(&user)).unwrap_or_default();
        let header = Element::paragraph(vec![
            Line::from(Span::styled(format!("Olá {}, bem vindo", name), theme.heading())),
            Line::from(Span::styled(
                "Selecione a ferramenta desejada para aplicação do questionário",
                theme.muted(),
            )),
        ]);

        let mut body = Element::column(Vec::new()).add(header, LayoutConstraint::Length(2));

        if ctx.is_admin() {
            let admin = Element::row(vec![
                Element::button("open-questions", "Cadastrar Questões")
                    .on_press(Msg::Open(Route::QuestionRegistry))
                    .build(),
                Element::button("open-areas", "Cadastrar Áreas")
                    .on_press(Msg::Open(Route::AreaRegistry))
                    .build(),
                Element::button("open-results", "Resultados")
                    .on_press(Msg::Open(Route::Results))
                    .build(),
                Element::button("define-parameters", "Definir Parâmetros")
                    .on_press(Msg::DefineParameters)
                    .build(),
            ])
            .build();
            body = body.add(
                Element::panel(admin).title("Administração").build(),
                LayoutConstraint::Length(5),
            );
        } else if ctx.role.is_admin().is_none() {
            body = body.add(
                Element::styled("Verificando permissões...", theme.muted()),
                LayoutConstraint::Length(1),
            );
        }

        let list = Element::list("instrument-list", &INSTRUMENTS, &state.instruments, theme)
            .on_select(Msg::InstrumentSelect)
            .on_activate(Msg::StartInstrument)
            .on_navigate(Msg::InstrumentNavigate)
            .build();
        body = body.add(
            Element::panel(list).title("Ferramentas (Enter para iniciar)").build(),
            LayoutConstraint::Fill(1),
        );

        Element::container(body.build()).build()
    }

    fn subscriptions(_state: &State) -> Vec<Subscription<Msg>> {
        vec![Subscription::keyboard(
            KeyCode::Char('w'),
            "Boas-vindas",
            Msg::Open(Route::Welcome),
        )]
    }

    fn title() -> &'static str {
        "Painel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryBackend;
    use crate::tui::apps::testing;
    use crate::tui::{Effect, Runtime};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(runtime: &mut Runtime<DashboardApp>, ctx: &AppContext) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| runtime.render(frame, &Theme::default(), ctx, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_admin_sees_management_shortcuts() {
        let backend = MemoryBackend::new();
        let ctx = testing::signed_in(&backend, "ana@acme.com", true).await;
        let mut runtime = Runtime::<DashboardApp>::new(&ctx);

        let text = screen(&mut runtime, &ctx);
        assert!(text.contains("Olá Ana, bem vindo"));
        assert!(text.contains("Cadastrar Áreas"));
        assert!(text.contains("HSE-IT"));
    }

    #[tokio::test]
    async fn test_participant_sees_only_catalogue() {
        let backend = MemoryBackend::new();
        let ctx = testing::signed_in(&backend, "joao@acme.com", false).await;
        let mut runtime = Runtime::<DashboardApp>::new(&ctx);

        let text = screen(&mut runtime, &ctx);
        assert!(!text.contains("Cadastrar Áreas"));
        assert!(text.contains("COPSOQ"));
    }

    #[tokio::test]
    async fn test_instrument_opens_questionnaire() {
        let backend = MemoryBackend::new();
        let ctx = testing::signed_in(&backend, "joao@acme.com", false).await;
        let mut runtime = Runtime::<DashboardApp>::new(&ctx);

        runtime.dispatch(Msg::InstrumentNavigate(KeyCode::Down), &ctx);
        runtime.dispatch(Msg::StartInstrument, &ctx);
        assert_eq!(runtime.take_effects(), vec![Effect::Navigate(Route::Questionnaire)]);

        runtime.dispatch(Msg::DefineParameters, &ctx);
        assert_eq!(runtime.take_effects(), vec![Effect::Notify(Notice::info("Em desenvolvimento"))]);
    }
}
