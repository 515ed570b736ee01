//! Results browser (admin only); the per-instrument views are not built yet

use crossterm::event::KeyCode;

use crate::survey::catalog::INSTRUMENTS;
use crate::tui::apps::page_header;
use crate::tui::{App, AppContext, Command, Element, LayoutConstraint, ListState, Notice, Theme};

pub struct ResultsApp;

#[derive(Debug, Clone)]
pub struct State {
    instruments: ListState,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Navigate(KeyCode),
    Select(usize),
    ViewResults,
}

impl App for ResultsApp {
    type State = State;
    type Msg = Msg;

    fn init(_ctx: &AppContext) -> (State, Command<Msg>) {
        let state = State {
            instruments: ListState::with_selection(),
        };
        (state, Command::set_focus("results-list"))
    }

    fn update(state: &mut State, msg: Msg, _ctx: &AppContext) -> Command<Msg> {
        match msg {
            Msg::Navigate(key) => {
                state.instruments.handle_key(key, INSTRUMENTS.len());
                Command::None
            }
            Msg::Select(index) => {
                state.instruments.select(Some(index));
                Command::None
            }
            Msg::ViewResults => {
                let name = state
                    .instruments
                    .selected()
                    .and_then(|i| INSTRUMENTS.get(i))
                    .map(|instrument| instrument.name)
                    .unwrap_or("HSE-IT");
                log::debug!("Results requested for {}", name);
                Command::notify(Notice::info(format!("Resultados de {} em desenvolvimento", name)))
            }
        }
    }

    fn view(state: &State, _ctx: &AppContext, theme: &Theme) -> Element<Msg> {
        let list = Element::list("results-list", &INSTRUMENTS, &state.instruments, theme)
            .on_select(Msg::Select)
            .on_navigate(Msg::Navigate)
            .on_activate(Msg::ViewResults)
            .build();

        Element::container(
            Element::column(Vec::new())
                .add(
                    page_header(
                        "Visualizar Resultados",
                        "Selecione a ferramenta para visualizar os resultados",
                        theme,
                    ),
                    LayoutConstraint::Length(2),
                )
                .add(
                    Element::panel(list).title("Ferramentas").build(),
                    LayoutConstraint::Fill(1),
                )
                .add(
                    Element::button("view-results", "Ver Resultados")
                        .on_press(Msg::ViewResults)
                        .build(),
                    LayoutConstraint::Length(3),
                )
                .build(),
        )
        .build()
    }

    fn title() -> &'static str {
        "Resultados"
    }
}
