//! Area registry (admin only): list, add and delete organisational areas

use crossterm::event::KeyCode;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use crate::api::AuthUser;
use crate::survey::repository::{areas, profiles};
use crate::survey::{Area, NewArea, Profile, ValidationError};
use crate::tui::apps::{error_text, page_header};
use crate::tui::{
    App, AppContext, Command, Element, LayoutConstraint, ListItem, ListState, Notice, Resource, Subscription,
    TextInputState, Theme,
};

pub struct AreaRegistryApp;

impl ListItem for Area {
    fn to_element<Msg>(&self, is_selected: bool, theme: &Theme) -> Element<Msg> {
        let name_style = if is_selected {
            Style::default().fg(theme.accent_primary).bold()
        } else {
            Style::default().fg(theme.text_primary)
        };
        let by = self.cadastrado_por_nome.as_deref().unwrap_or("-");
        let org = self.organizacao.as_deref().filter(|o| !o.is_empty()).unwrap_or("-");
        Element::styled_text(Line::from(vec![
            Span::styled(format!(" {:<30}", self.nome_area), name_style),
            Span::styled(format!("{}  ·  por {}", org, by), theme.muted()),
        ]))
    }
}

#[derive(Debug, Clone)]
pub struct State {
    areas: Resource<Vec<Area>>,
    list_state: ListState,
    name: String,
    name_input: TextInputState,
    saving: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            areas: Resource::Loading,
            list_state: ListState::with_selection(),
            name: String::new(),
            name_input: TextInputState::new(),
            saving: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    Loaded(Result<Vec<Area>, String>),
    NameEvent(KeyCode),
    Add,
    Added(Result<(), String>),
    ListNavigate(KeyCode),
    ListSelect(usize),
    DeleteSelected,
    Deleted(Result<(), String>),
    Reload,
}

/// Creator name stamped on new rows: profile name, then e-mail
fn creator_name(profile_name: Option<String>, user: &AuthUser) -> String {
    profile_name
        .filter(|name| !name.trim().is_empty())
        .or_else(|| user.email.clone())
        .unwrap_or_else(|| "Usuário".to_string())
}

fn load(ctx: &AppContext) -> Command<Msg> {
    let client = ctx.client.clone();
    Command::perform(
        async move { areas::list_recent(client.as_ref()).await.map_err(|e| error_text(&e)) },
        Msg::Loaded,
    )
}

impl App for AreaRegistryApp {
    type State = State;
    type Msg = Msg;

    fn init(ctx: &AppContext) -> (State, Command<Msg>) {
        (State::default(), Command::batch(vec![load(ctx), Command::set_focus("area-name")]))
    }

    fn update(state: &mut State, msg: Msg, ctx: &AppContext) -> Command<Msg> {
        match msg {
            Msg::Loaded(Ok(list)) => {
                state.list_state.clamp(list.len());
                state.areas = Resource::Success(list);
                Command::None
            }
            Msg::Loaded(Err(e)) => {
                state.areas = Resource::Failure(e.clone());
                Command::notify(Notice::error(format!("Erro ao carregar áreas: {}", e)))
            }
            Msg::Reload => {
                state.areas = Resource::Loading;
                load(ctx)
            }
            Msg::NameEvent(key) => {
                state.name_input.apply(key, &mut state.name);
                Command::None
            }
            Msg::Add => {
                if state.saving {
                    return Command::None;
                }
                let name = state.name.trim().to_string();
                if name.is_empty() {
                    return Command::notify(Notice::warning(ValidationError::EmptyAreaName.to_string()));
                }
                let Some(user) = ctx.user() else {
                    return Command::None;
                };
                state.saving = true;
                let client = ctx.client.clone();
                Command::perform(
                    async move {
                        let profile = match profiles::get(client.as_ref(), &user.id).await {
                            Ok(profile) => profile.unwrap_or_default(),
                            Err(e) => {
                                log::warn!("Profile lookup failed for {}, stamping area without it: {:#}", user.id, e);
                                Profile::default()
                            }
                        };
                        let area = NewArea {
                            nome_area: name,
                            organizacao: profile.organization.unwrap_or_default(),
                            cadastrado_por: user.id.clone(),
                            cadastrado_por_nome: creator_name(profile.full_name, &user),
                        };
                        areas::insert(client.as_ref(), &area).await
                    },
                    |result: anyhow::Result<()>| Msg::Added(result.map_err(|e| error_text(&e))),
                )
            }
            Msg::Added(Ok(())) => {
                state.saving = false;
                state.name.clear();
                state.name_input.reset();
                Command::batch(vec![
                    Command::notify(Notice::success("Área cadastrada com sucesso!")),
                    load(ctx),
                ])
            }
            Msg::Added(Err(e)) => {
                state.saving = false;
                Command::notify(Notice::error(format!("Erro ao cadastrar área: {}", e)))
            }
            Msg::ListNavigate(key) => {
                let count = state.areas.to_option().map(Vec::len).unwrap_or(0);
                state.list_state.handle_key(key, count);
                Command::None
            }
            Msg::ListSelect(index) => {
                state.list_state.select(Some(index));
                Command::None
            }
            Msg::DeleteSelected => {
                let selected = state
                    .areas
                    .to_option()
                    .zip(state.list_state.selected())
                    .and_then(|(list, i)| list.get(i))
                    .map(|area| area.id.clone());
                let Some(id) = selected else {
                    return Command::None;
                };
                let client = ctx.client.clone();
                Command::perform(
                    async move { areas::delete(client.as_ref(), &id).await.map_err(|e| error_text(&e)) },
                    Msg::Deleted,
                )
            }
            Msg::Deleted(Ok(())) => Command::batch(vec![
                Command::notify(Notice::success("Área excluída com sucesso!")),
                load(ctx),
            ]),
            Msg::Deleted(Err(e)) => Command::notify(Notice::error(format!("Erro ao excluir área: {}", e))),
        }
    }

    fn view(state: &State, _ctx: &AppContext, theme: &Theme) -> Element<Msg> {
        let form = Element::row(Vec::new())
            .add(
                Element::panel(
                    Element::text_input("area-name", &state.name, &state.name_input)
                        .placeholder("Ex.: Recursos Humanos")
                        .on_change(Msg::NameEvent)
                        .on_submit(Msg::Add)
                        .build(),
                )
                .title("Nome da área")
                .build(),
                LayoutConstraint::Fill(3),
            )
            .add(
                Element::button("area-add", if state.saving { "Salvando..." } else { "Cadastrar" })
                    .on_press(Msg::Add)
                    .build(),
                LayoutConstraint::Fill(1),
            )
            .build();

        let listing = match &state.areas {
            Resource::Success(list) if list.is_empty() => Element::styled("Nenhuma área cadastrada ainda", theme.muted()),
            Resource::Success(list) => Element::list("area-list", list, &state.list_state, theme)
                .on_select(Msg::ListSelect)
                .on_navigate(Msg::ListNavigate)
                .on_activate(Msg::DeleteSelected)
                .build(),
            Resource::Failure(e) => Element::styled(format!("Erro: {}", e), Style::default().fg(theme.accent_error)),
            Resource::Loading | Resource::NotAsked => Element::styled("Carregando...", theme.muted()),
        };
        let count = state.areas.to_option().map(Vec::len).unwrap_or(0);

        Element::container(
            Element::column(Vec::new())
                .add(
                    page_header("Cadastrar Áreas", "Cadastre as áreas e setores da organização", theme),
                    LayoutConstraint::Length(2),
                )
                .add(form, LayoutConstraint::Length(3))
                .add(
                    Element::panel(listing)
                        .title(format!("Áreas cadastradas ({}) · Enter/Del exclui", count))
                        .build(),
                    LayoutConstraint::Fill(1),
                )
                .build(),
        )
        .build()
    }

    fn subscriptions(_state: &State) -> Vec<Subscription<Msg>> {
        vec![
            Subscription::keyboard(KeyCode::Delete, "Excluir área", Msg::DeleteSelected),
            Subscription::ctrl_key(KeyCode::Char('r'), "Recarregar", Msg::Reload),
        ]
    }

    fn title() -> &'static str {
        "Cadastrar Áreas"
    }
}
