use std::rc::Rc;

use gloo::console::{error, log};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::{ActionOutcome, ApiClient};
use crate::banner::{announce, Banner, BannerKind};
use crate::config::BoardConfig;
use crate::error::Result;
use crate::markup::{self, DELETE_CLASS};
use crate::model::ActivityMap;

const SIGNUP_FALLBACK: &str = "An error occurred";
const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
const REMOVED: &str = "Participant removed";
const UNREGISTER_FALLBACK: &str = "Failed to unregister participant";
const UNREGISTER_FAILED: &str = "Failed to unregister participant. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Loaded(ActivityMap),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub list: ListView,
    /// Names offered by the signup select. A failed refresh leaves them alone.
    pub options: Vec<String>,
    /// Bumped on every successful refresh; keys the list so its controls are rebuilt.
    pub generation: u64,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            list: ListView::Loading,
            options: Vec::new(),
            generation: 0,
        }
    }
}

pub enum BoardAction {
    Loaded(ActivityMap),
    LoadFailed,
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            BoardAction::Loaded(activities) => Rc::new(BoardState {
                options: activities.names(),
                list: ListView::Loaded(activities),
                generation: self.generation + 1,
            }),
            BoardAction::LoadFailed => Rc::new(BoardState {
                list: ListView::Failed,
                ..(*self).clone()
            }),
        }
    }
}

/// One thing the page does once a signup or unregister request settles.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Announce(BannerKind, String),
    ResetForm,
    /// Re-fetch the whole board. Only successes refresh.
    Refresh,
    /// Turn the triggering unregister button back on.
    Reenable,
}

pub fn signup_steps(result: &Result<ActionOutcome>) -> Vec<Step> {
    match result {
        Ok(ActionOutcome::Accepted(message)) => vec![
            Step::Announce(BannerKind::Success, message.clone().unwrap_or_default()),
            Step::ResetForm,
            Step::Refresh,
        ],
        Ok(ActionOutcome::Rejected(detail)) => vec![Step::Announce(
            BannerKind::Error,
            detail.clone().unwrap_or_else(|| SIGNUP_FALLBACK.into()),
        )],
        Err(_) => vec![Step::Announce(BannerKind::Error, SIGNUP_FAILED.into())],
    }
}

pub fn unregister_steps(result: &Result<ActionOutcome>) -> Vec<Step> {
    match result {
        Ok(ActionOutcome::Accepted(message)) => vec![
            Step::Announce(
                BannerKind::Success,
                message.clone().unwrap_or_else(|| REMOVED.into()),
            ),
            Step::Refresh,
        ],
        Ok(ActionOutcome::Rejected(detail)) => vec![
            Step::Announce(
                BannerKind::Error,
                detail.clone().unwrap_or_else(|| UNREGISTER_FALLBACK.into()),
            ),
            Step::Reenable,
        ],
        Err(_) => vec![
            Step::Announce(BannerKind::Error, UNREGISTER_FAILED.into()),
            Step::Reenable,
        ],
    }
}

/// Handles a settled request's steps can reach.
struct Effects {
    api: ApiClient,
    board: UseReducerDispatcher<BoardState>,
    banner: UseReducerDispatcher<Banner>,
    hide_ms: u32,
    form: Option<NodeRef>,
    control: Option<HtmlButtonElement>,
}

impl Effects {
    fn run(&self, steps: Vec<Step>) {
        for step in steps {
            match step {
                Step::Announce(kind, text) => announce(&self.banner, self.hide_ms, kind, text),
                Step::ResetForm => {
                    if let Some(form) = self.form.as_ref().and_then(|f| f.cast::<HtmlFormElement>()) {
                        form.reset();
                    }
                }
                Step::Refresh => refresh(self.api.clone(), self.board.clone()),
                Step::Reenable => {
                    if let Some(control) = &self.control {
                        control.set_disabled(false);
                    }
                }
            }
        }
    }
}

/// Fetches the whole board and swaps it in. Responses land in completion
/// order; an older refresh that finishes last wins.
fn refresh(api: ApiClient, board: UseReducerDispatcher<BoardState>) {
    spawn_local(async move {
        match api.list_activities().await {
            Ok(activities) => {
                log!(format!("Loaded {} activities", activities.len()));
                board.dispatch(BoardAction::Loaded(activities));
            }
            Err(e) => {
                error!(format!("Error fetching activities: {e}"));
                board.dispatch(BoardAction::LoadFailed);
            }
        }
    });
}

fn delete_control(e: &MouseEvent) -> Option<HtmlButtonElement> {
    let target: Element = e.target_dyn_into()?;
    let control = target.closest(&format!(".{DELETE_CLASS}")).ok().flatten()?;
    control.dyn_into::<HtmlButtonElement>().ok()
}

#[derive(Properties, PartialEq)]
pub struct BoardProps {
    #[prop_or_default]
    pub config: BoardConfig,
}

#[function_component(ActivityBoard)]
pub fn activity_board(props: &BoardProps) -> Html {
    let api = ApiClient::new(props.config.api_base.clone());
    let hide_ms = props.config.banner_ms;

    let board = use_reducer(BoardState::default);
    let banner = use_reducer(Banner::default);

    let form_ref = use_node_ref();
    let email_ref = use_node_ref();
    let activity_ref = use_node_ref();

    {
        let board = board.dispatcher();
        use_effect_with(api.clone(), move |api| {
            refresh(api.clone(), board);
            || ()
        });
    }

    let on_submit = {
        let api = api.clone();
        let board = board.dispatcher();
        let banner = banner.dispatcher();
        let form_ref = form_ref.clone();
        let email_ref = email_ref.clone();
        let activity_ref = activity_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email = email_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let activity = activity_ref
                .cast::<HtmlSelectElement>()
                .map(|select| select.value())
                .unwrap_or_default();

            let api = api.clone();
            let board = board.clone();
            let banner = banner.clone();
            let form_ref = form_ref.clone();
            spawn_local(async move {
                let result = api.signup(&activity, &email).await;
                if let Err(e) = &result {
                    error!(format!("Error signing up: {e}"));
                }
                let effects = Effects {
                    api,
                    board,
                    banner,
                    hide_ms,
                    form: Some(form_ref),
                    control: None,
                };
                effects.run(signup_steps(&result));
            });
        })
    };

    // One delegated handler serves every unregister button in the list.
    let on_list_click = {
        let api = api.clone();
        let board = board.dispatcher();
        let banner = banner.dispatcher();
        Callback::from(move |e: MouseEvent| {
            let Some(control) = delete_control(&e) else {
                return;
            };
            let (Some(email), Some(activity)) = (
                control.get_attribute("data-email"),
                control.get_attribute("data-activity"),
            ) else {
                return;
            };
            control.set_disabled(true);

            let api = api.clone();
            let board = board.clone();
            let banner = banner.clone();
            spawn_local(async move {
                let result = api.unregister(&activity, &email).await;
                if let Err(e) = &result {
                    error!(format!("Error removing participant: {e}"));
                }
                let effects = Effects {
                    api,
                    board,
                    banner,
                    hide_ms,
                    form: None,
                    control: Some(control),
                };
                effects.run(unregister_steps(&result));
            });
        })
    };

    let list = match &board.list {
        ListView::Loading => html! { <p>{ markup::LOADING }</p> },
        ListView::Failed => html! { <p>{ markup::LOAD_FAILED }</p> },
        ListView::Loaded(activities) => {
            Html::from_html_unchecked(AttrValue::from(markup::activity_cards(activities)))
        }
    };

    html! {
        <main class="activity-board">
            <header>
                <h1>{ "Extracurricular Activities" }</h1>
            </header>

            <section id="activities-container">
                <h3>{ "Available Activities" }</h3>
                <div
                    id="activities-list"
                    key={board.generation.to_string()}
                    onclick={on_list_click}
                >
                    { list }
                </div>
            </section>

            <section id="signup-container">
                <h3>{ "Sign Up for an Activity" }</h3>
                <form id="signup-form" ref={form_ref} onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{ "Student Email:" }</label>
                        <input
                            type="email"
                            id="email"
                            ref={email_ref}
                            required=true
                            placeholder="your-email@mergington.edu"
                        />
                    </div>
                    <div class="form-group">
                        <label for="activity">{ "Select Activity:" }</label>
                        <select id="activity" ref={activity_ref} required=true>
                            <option value="">{ "-- Select an activity --" }</option>
                            { for board.options.iter().map(|name| html! {
                                <option value={name.clone()}>{ name.clone() }</option>
                            }) }
                        </select>
                    </div>
                    <button type="submit">{ "Sign Up" }</button>
                </form>
                <div id="message" class={banner.class_list()}>{ banner.text.clone() }</div>
            </section>
        </main>
    }
}
