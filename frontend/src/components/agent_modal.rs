use crate::api::ApiClient;
use crate::store::{StoreContext, apply_outcome};
use shared::forms::{AgentRegistrationForm, PersonalityCreator, Rejection, SubmitOutcome};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AgentModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_success: Option<Callback<()>>,
}

#[function_component(AgentModal)]
pub fn agent_modal(props: &AgentModalProps) -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let redraw = use_force_update();
    let form = use_mut_ref(AgentRegistrationForm::new);
    let missing = use_state(|| None::<&'static str>);

    {
        let form = form.clone();
        use_effect_with(props.is_open, move |open| {
            if *open {
                form.borrow_mut().open();
            }
            || ()
        });
    }

    let on_cancel = {
        let form = form.clone();
        let missing = missing.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            form.borrow_mut().dismiss();
            missing.set(None);
            on_close.emit(());
        })
    };

    let on_name_input = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: InputEvent| {
            let i: web_sys::HtmlInputElement = e.target_unchecked_into();
            form.borrow_mut().set_name(i.value());
            redraw.force_update();
        })
    };

    let on_agent_id_input = {
        let form = form.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: InputEvent| {
            let i: web_sys::HtmlInputElement = e.target_unchecked_into();
            form.borrow_mut().set_agent_id(i.value());
            redraw.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let redraw = redraw.clone();
        let missing = missing.clone();
        let store = store.clone();
        let on_close = props.on_close.clone();
        let on_success = props.on_success.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let request = match form.borrow_mut().begin_submit(&store.user) {
                Ok(request) => request,
                Err(Rejection::MissingRequired(field)) => {
                    missing.set(Some(field));
                    return;
                }
                Err(_) => return,
            };
            missing.set(None);
            redraw.force_update();

            let form = form.clone();
            let redraw = redraw.clone();
            let store = store.clone();
            let on_close = on_close.clone();
            let on_success = on_success.clone();
            yew::platform::spawn_local(async move {
                let result = ApiClient.create_personality(request).await;
                let outcome = form.borrow_mut().finish_submit(result);
                redraw.force_update();
                if let SubmitOutcome::Created { .. } = &outcome {
                    on_close.emit(());
                    if let Some(cb) = &on_success {
                        cb.emit(());
                    }
                }
                apply_outcome(&store, outcome);
            });
        })
    };

    if !props.is_open {
        return html! {};
    }

    let f = form.borrow();
    let submitting = f.is_submitting();
    let hint = match *missing {
        Some("name") => "Character name is required",
        Some(_) => "Agent ID is required",
        None => "",
    };

    html! {
        <div class="modal-overlay" onclick={on_cancel.clone()}>
            <div class="modal-content" onclick={|e: MouseEvent| e.stop_propagation()}>
                <div class="modal-header">
                    <h2 class="modal-title">{"Add Eleven Labs Character"}</h2>
                    <button class="close-btn" onclick={on_cancel.clone()}>{"×"}</button>
                </div>

                <div class="modal-body">
                    <div class="form-group">
                        <label class="form-label" for="elevenLabsName">{"Character Name"}</label>
                        <input class="form-input" type="text" id="elevenLabsName"
                            placeholder="My Eleven Labs Character" required=true
                            value={f.draft().name.clone()} oninput={on_name_input} />
                    </div>

                    <div class="form-group">
                        <label class="form-label" for="elevenLabsAgentId">{"Agent ID"}</label>
                        <input class="form-input" type="text" id="elevenLabsAgentId"
                            placeholder="your-agent-id-here" required=true
                            value={f.draft().agent_id.clone()} oninput={on_agent_id_input} />
                        <p class="field-hint">
                            {"Find this in your Eleven Labs dashboard under your agent settings"}
                        </p>
                    </div>

                    <span class="field-error">{hint}</span>

                    <div class="form-actions">
                        <button class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                        <button class="btn btn-primary" disabled={submitting} onclick={on_submit}>
                            {if submitting { "Adding..." } else { "Add Character" }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
