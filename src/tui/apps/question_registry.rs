//! Question registry: compose drafts locally, save them in one bulk insert,
//! and manage the questions already registered

use crossterm::event::KeyCode;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use crate::survey::repository::{profiles, questions};
use crate::survey::{Dimension, DraftList, Polarity, Question, QuestionDraft};
use crate::tui::apps::{error_text, page_header};
use crate::tui::{
    App, AppContext, Command, Element, LayoutConstraint, ListItem, ListState, Notice, Resource, SelectState,
    Subscription, TextInputState, Theme,
};

pub struct QuestionRegistryApp;

fn tag_spans(sentido: Polarity, dimensao: Dimension, theme: &Theme) -> Vec<Span<'static>> {
    let polarity_color = match sentido {
        Polarity::Positivo => theme.accent_success,
        Polarity::Negativo => theme.accent_warning,
    };
    vec![
        Span::styled(format!("[{}] ", sentido.label()), Style::default().fg(polarity_color)),
        Span::styled(format!("[{}] ", dimensao.label()), Style::default().fg(theme.accent_secondary)),
    ]
}

impl ListItem for QuestionDraft {
    fn to_element<Msg>(&self, is_selected: bool, theme: &Theme) -> Element<Msg> {
        let mut spans = vec![Span::raw(" ")];
        spans.extend(tag_spans(self.sentido, self.dimensao, theme));
        let text_style = if is_selected {
            Style::default().fg(theme.accent_primary).bold()
        } else {
            Style::default().fg(theme.text_primary)
        };
        spans.push(Span::styled(self.pergunta.clone(), text_style));
        Element::styled_text(Line::from(spans))
    }
}

impl ListItem for Question {
    fn to_element<Msg>(&self, is_selected: bool, theme: &Theme) -> Element<Msg> {
        let mut spans = vec![Span::raw(" ")];
        spans.extend(tag_spans(self.sentido, self.dimensao, theme));
        let text_style = if is_selected {
            Style::default().fg(theme.accent_primary).bold()
        } else {
            Style::default().fg(theme.text_primary)
        };
        spans.push(Span::styled(self.pergunta.clone(), text_style));
        if let Some(by) = self.cadastrado_por_nome.as_deref().filter(|n| !n.is_empty()) {
            spans.push(Span::styled(format!("  · {}", by), theme.muted()));
        }
        Element::styled_text(Line::from(spans))
    }
}

#[derive(Debug, Clone)]
pub struct State {
    drafts: DraftList,
    draft_list: ListState,

    text: String,
    text_input: TextInputState,
    polarity: SelectState,
    dimension: SelectState,

    registered: Resource<Vec<Question>>,
    registered_list: ListState,

    saving: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            drafts: DraftList::new(),
            draft_list: ListState::with_selection(),
            text: String::new(),
            text_input: TextInputState::new(),
            polarity: SelectState::with_selected(0),
            dimension: SelectState::with_selected(0),
            registered: Resource::Loading,
            registered_list: ListState::with_selection(),
            saving: false,
        }
    }
}

impl State {
    fn selected_polarity(&self) -> Polarity {
        self.polarity.value(&Polarity::ALL).copied().unwrap_or(Polarity::Positivo)
    }

    fn selected_dimension(&self) -> Dimension {
        self.dimension.value(&Dimension::ALL).copied().unwrap_or(Dimension::Demands)
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    TextEvent(KeyCode),
    PolaritySelect(usize),
    DimensionSelect(usize),
    AddDraft,
    DraftNavigate(KeyCode),
    DraftSelect(usize),
    RemoveDraft,
    Save,
    Saved(Result<usize, String>),
    Loaded(Result<Vec<Question>, String>),
    RegisteredNavigate(KeyCode),
    RegisteredSelect(usize),
    DeleteRegistered,
    Deleted(Result<(), String>),
}

fn load(ctx: &AppContext) -> Command<Msg> {
    let client = ctx.client.clone();
    Command::perform(
        async move { questions::list_recent(client.as_ref()).await.map_err(|e| error_text(&e)) },
        Msg::Loaded,
    )
}

impl App for QuestionRegistryApp {
    type State = State;
    type Msg = Msg;

    fn init(ctx: &AppContext) -> (State, Command<Msg>) {
        (State::default(), Command::batch(vec![load(ctx), Command::set_focus("question-text")]))
    }

    fn update(state: &mut State, msg: Msg, ctx: &AppContext) -> Command<Msg> {
        match msg {
            Msg::TextEvent(key) => {
                state.text_input.apply(key, &mut state.text);
                Command::None
            }
            Msg::PolaritySelect(index) => {
                state.polarity.select(index);
                Command::None
            }
            Msg::DimensionSelect(index) => {
                state.dimension.select(index);
                Command::None
            }
            Msg::AddDraft => {
                let (sentido, dimensao) = (state.selected_polarity(), state.selected_dimension());
                match state.drafts.add(&state.text, sentido, dimensao) {
                    Ok(_) => {
                        state.text.clear();
                        state.text_input.reset();
                        state.draft_list.clamp(state.drafts.len());
                        Command::set_focus("question-text")
                    }
                    Err(e) => Command::notify(Notice::warning(e.to_string())),
                }
            }
            Msg::DraftNavigate(key) => {
                state.draft_list.handle_key(key, state.drafts.len());
                Command::None
            }
            Msg::DraftSelect(index) => {
                state.draft_list.select(Some(index));
                Command::None
            }
            Msg::RemoveDraft => {
                let id = state
                    .draft_list
                    .selected()
                    .and_then(|i| state.drafts.drafts().get(i))
                    .map(|draft| draft.id);
                if let Some(id) = id {
                    state.drafts.remove(id);
                    state.draft_list.clamp(state.drafts.len());
                }
                Command::None
            }
            Msg::Save => {
                if state.saving {
                    return Command::None;
                }
                if state.drafts.is_empty() {
                    return Command::notify(Notice::warning(
                        crate::survey::ValidationError::NoDraftQuestions.to_string(),
                    ));
                }
                let Some(user) = ctx.user() else {
                    return Command::None;
                };
                state.saving = true;
                let client = ctx.client.clone();
                let drafts = state.drafts.clone();
                Command::perform(
                    async move {
                        let profile = profiles::require(client.as_ref(), &user.id).await?;
                        let rows = drafts.to_new_questions(&user.id, &profile)?;
                        questions::insert_many(client.as_ref(), &rows).await
                    },
                    |result: anyhow::Result<usize>| Msg::Saved(result.map_err(|e| error_text(&e))),
                )
            }
            Msg::Saved(Ok(count)) => {
                log::info!("Saved {} draft question(s)", count);
                state.saving = false;
                state.drafts.clear();
                state.draft_list.clamp(0);
                Command::batch(vec![
                    Command::notify(Notice::success("Questões cadastradas com sucesso!")),
                    load(ctx),
                ])
            }
            Msg::Saved(Err(e)) => {
                state.saving = false;
                Command::notify(Notice::error(format!("Erro ao salvar questões: {}", e)))
            }
            Msg::Loaded(Ok(list)) => {
                state.registered_list.clamp(list.len());
                state.registered = Resource::Success(list);
                Command::None
            }
            Msg::Loaded(Err(e)) => {
                state.registered = Resource::Failure(e.clone());
                Command::notify(Notice::error(format!("Erro ao carregar questões: {}", e)))
            }
            Msg::RegisteredNavigate(key) => {
                let count = state.registered.to_option().map(Vec::len).unwrap_or(0);
                state.registered_list.handle_key(key, count);
                Command::None
            }
            Msg::RegisteredSelect(index) => {
                state.registered_list.select(Some(index));
                Command::None
            }
            Msg::DeleteRegistered => {
                let selected = state
                    .registered
                    .to_option()
                    .zip(state.registered_list.selected())
                    .and_then(|(list, i)| list.get(i))
                    .map(|question| question.id.clone());
                let Some(id) = selected else {
                    return Command::None;
                };
                let client = ctx.client.clone();
                Command::perform(
                    async move { questions::delete(client.as_ref(), &id).await.map_err(|e| error_text(&e)) },
                    Msg::Deleted,
                )
            }
            Msg::Deleted(Ok(())) => Command::batch(vec![
                Command::notify(Notice::success("Questão excluída com sucesso!")),
                load(ctx),
            ]),
            Msg::Deleted(Err(e)) => Command::notify(Notice::error(format!("Erro ao excluir questão: {}", e))),
        }
    }

    fn view(state: &State, _ctx: &AppContext, theme: &Theme) -> Element<Msg> {
        let polarity_options = Polarity::ALL.iter().map(|p| p.label().to_string()).collect();
        let dimension_options = Dimension::ALL.iter().map(|d| d.label().to_string()).collect();

        let editor = Element::column(Vec::new())
            .add(
                Element::panel(
                    Element::text_input("question-text", &state.text, &state.text_input)
                        .placeholder("Digite a pergunta")
                        .on_change(Msg::TextEvent)
                        .on_submit(Msg::AddDraft)
                        .build(),
                )
                .title("Pergunta")
                .build(),
                LayoutConstraint::Length(3),
            )
            .add(
                Element::row(vec![
                    Element::panel(
                        Element::select("question-polarity", polarity_options, &state.polarity)
                            .on_select(Msg::PolaritySelect)
                            .build(),
                    )
                    .title("Sentido")
                    .build(),
                    Element::panel(
                        Element::select("question-dimension", dimension_options, &state.dimension)
                            .on_select(Msg::DimensionSelect)
                            .build(),
                    )
                    .title("Dimensão")
                    .build(),
                    Element::button("question-add", "Adicionar").on_press(Msg::AddDraft).build(),
                ])
                .build(),
                LayoutConstraint::Length(3),
            )
            .spacing(0)
            .build();

        let drafts = if state.drafts.is_empty() {
            Element::styled("Nenhuma questão adicionada", theme.muted())
        } else {
            Element::list("draft-list", state.drafts.drafts(), &state.draft_list, theme)
                .on_select(Msg::DraftSelect)
                .on_navigate(Msg::DraftNavigate)
                .on_activate(Msg::RemoveDraft)
                .build()
        };

        let registered = match &state.registered {
            Resource::Success(list) if list.is_empty() => Element::styled("Nenhuma questão cadastrada ainda", theme.muted()),
            Resource::Success(list) => Element::list("registered-list", list, &state.registered_list, theme)
                .on_select(Msg::RegisteredSelect)
                .on_navigate(Msg::RegisteredNavigate)
                .on_activate(Msg::DeleteRegistered)
                .build(),
            Resource::Failure(e) => Element::styled(format!("Erro: {}", e), Style::default().fg(theme.accent_error)),
            Resource::Loading | Resource::NotAsked => Element::styled("Carregando...", theme.muted()),
        };

        let save_label = if state.saving {
            "Salvando...".to_string()
        } else {
            format!("Salvar {} questão(ões)", state.drafts.len())
        };

        Element::container(
            Element::column(Vec::new())
                .add(
                    page_header(
                        "Cadastrar Questões",
                        "Cadastre as questões que serão aplicadas no questionário",
                        theme,
                    ),
                    LayoutConstraint::Length(2),
                )
                .add(editor, LayoutConstraint::Length(6))
                .add(
                    Element::panel(drafts)
                        .title(format!("Rascunhos ({}) · Enter remove", state.drafts.len()))
                        .build(),
                    LayoutConstraint::Fill(1),
                )
                .add(
                    Element::button("question-save", save_label).on_press(Msg::Save).build(),
                    LayoutConstraint::Length(3),
                )
                .add(
                    Element::panel(registered)
                        .title("Questões cadastradas · Enter exclui")
                        .build(),
                    LayoutConstraint::Fill(1),
                )
                .build(),
        )
        .build()
    }

    fn subscriptions(_state: &State) -> Vec<Subscription<Msg>> {
        vec![Subscription::ctrl_key(KeyCode::Char('s'), "Salvar questões", Msg::Save)]
    }

    fn title() -> &'static str {
        "Cadastrar Questões"
    }
}
