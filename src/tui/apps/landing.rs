//! Public landing page: hero, methodology, the seven dimensions, features and
//! the call to action

use crossterm::event::KeyCode;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use crate::survey::Dimension;
use crate::survey::catalog::{self, Highlight};
use crate::tui::{App, AppContext, Command, Element, LayoutConstraint, Route, Subscription, Theme};

pub struct LandingApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Methodology,
    Dimensions,
    Features,
}

impl Section {
    const ALL: [Section; 4] = [Section::Overview, Section::Methodology, Section::Dimensions, Section::Features];

    fn title(self) -> &'static str {
        match self {
            Section::Overview => "Visão Geral",
            Section::Methodology => "Metodologia",
            Section::Dimensions => "Dimensões",
            Section::Features => "Recursos",
        }
    }

    fn step(self, forward: bool) -> Section {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % Self::ALL.len()
        } else {
            (index + Self::ALL.len() - 1) % Self::ALL.len()
        };
        Self::ALL[next]
    }
}

#[derive(Debug, Clone)]
pub struct State {
    section: Section,
}

#[derive(Debug, Clone)]
pub enum Msg {
    NextSection,
    PreviousSection,
    GetStarted,
}

fn highlight_lines(items: &[Highlight], theme: &Theme) -> Vec<Line<'static>> {
    items
        .iter()
        .flat_map(|item| {
            [
                Line::from(Span::styled(
                    format!("• {}", item.title),
                    Style::default().fg(theme.accent_secondary).bold(),
                )),
                Line::from(Span::styled(format!("  {}", item.description), theme.muted())),
            ]
        })
        .collect()
}

fn section_lines(section: Section, theme: &Theme) -> Vec<Line<'static>> {
    match section {
        Section::Overview => {
            let mut lines = vec![
                Line::from(Span::styled(catalog::HERO_BADGE, Style::default().fg(theme.accent_info))),
                Line::from(""),
                Line::from(Span::styled(catalog::HERO_TAGLINE, Style::default().fg(theme.text_primary))),
                Line::from(""),
            ];
            lines.push(Line::from(
                catalog::HERO_STATS
                    .iter()
                    .flat_map(|(value, label)| {
                        [
                            Span::styled(value.to_string(), Style::default().fg(theme.accent_tertiary).bold()),
                            Span::styled(format!(" {}    ", label), theme.muted()),
                        ]
                    })
                    .collect::<Vec<_>>(),
            ));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(catalog::CTA_TITLE, theme.heading())));
            lines.push(Line::from(Span::styled(catalog::CTA_TEXT, theme.muted())));
            lines
        }
        Section::Methodology => highlight_lines(&catalog::METHODOLOGY, theme),
        Section::Dimensions => Dimension::ALL
            .iter()
            .map(|dimension| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<24}", dimension.label()),
                        Style::default().fg(theme.accent_secondary).bold(),
                    ),
                    Span::styled(dimension.description(), theme.muted()),
                ])
            })
            .collect(),
        Section::Features => highlight_lines(&catalog::FEATURES, theme),
    }
}

impl App for LandingApp {
    type State = State;
    type Msg = Msg;

    fn init(_ctx: &AppContext) -> (State, Command<Msg>) {
        (
            State {
                section: Section::Overview,
            },
            Command::set_focus("get-started"),
        )
    }

    fn update(state: &mut State, msg: Msg, _ctx: &AppContext) -> Command<Msg> {
        match msg {
            Msg::NextSection => {
                state.section = state.section.step(true);
                Command::None
            }
            Msg::PreviousSection => {
                state.section = state.section.step(false);
                Command::None
            }
            Msg::GetStarted => Command::navigate(Route::Auth),
        }
    }

    fn view(state: &State, _ctx: &AppContext, theme: &Theme) -> Element<Msg> {
        let tabs: Vec<Span> = Section::ALL
            .iter()
            .flat_map(|section| {
                let style = if *section == state.section {
                    Style::default().fg(theme.accent_primary).bold().underlined()
                } else {
                    theme.muted()
                };
                [Span::styled(section.title(), style), Span::raw("   ")]
            })
            .collect();

        let body = Element::panel(Element::paragraph(section_lines(state.section, theme)))
            .title(state.section.title())
            .build();

        let actions = Element::row(vec![
            Element::button("get-started", "Começar Agora").on_press(Msg::GetStarted).build(),
            Element::button("next-section", "Próxima Seção ›").on_press(Msg::NextSection).build(),
        ])
        .build();

        Element::container(
            Element::column(Vec::new())
                .add(
                    Element::styled(catalog::HERO_TITLE, theme.heading()),
                    LayoutConstraint::Length(1),
                )
                .add(Element::styled_text(Line::from(tabs)), LayoutConstraint::Length(1))
                .add(body, LayoutConstraint::Fill(1))
                .add(actions, LayoutConstraint::Length(3))
                .build(),
        )
        .build()
    }

    fn subscriptions(_state: &State) -> Vec<Subscription<Msg>> {
        vec![
            Subscription::keyboard(KeyCode::Right, "Próxima seção", Msg::NextSection),
            Subscription::keyboard(KeyCode::Left, "Seção anterior", Msg::PreviousSection),
            Subscription::keyboard(KeyCode::Char('e'), "Entrar", Msg::GetStarted),
        ]
    }

    fn title() -> &'static str {
        "Início"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryBackend;
    use crate::tui::apps::testing;
    use crate::tui::{Effect, Runtime};

    #[tokio::test]
    async fn test_call_to_action_opens_auth() {
        let backend = MemoryBackend::new();
        let ctx = testing::context(&backend).await;
        let mut runtime = Runtime::<LandingApp>::new(&ctx);

        runtime.dispatch(Msg::GetStarted, &ctx);
        assert_eq!(runtime.take_effects(), vec![Effect::Navigate(Route::Auth)]);
    }

    #[test]
    fn test_sections_cycle() {
        assert_eq!(Section::Overview.step(false), Section::Features);
        assert_eq!(Section::Features.step(true), Section::Overview);
        assert_eq!(Section::Methodology.step(true), Section::Dimensions);
    }

    #[test]
    fn test_dimension_section_lists_all_seven() {
        let lines = section_lines(Section::Dimensions, &Theme::default());
        assert_eq!(lines.len(), 7);
    }
}
